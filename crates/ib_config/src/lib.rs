// crates/ib_config/src/lib.rs

//! IBFlow Config Layer
//!
//! 后处理算例配置，支持 YAML 与 JSON。
//!
//! # 模块概览
//!
//! - [`case_config`]: CaseConfig 算例配置
//! - [`monitor`]: 求解器体积监测区文件
//! - [`error`]: 配置错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod case_config;
pub mod error;
pub mod monitor;

// 重导出核心类型
pub use case_config::{
    BodyConfig, BodyShape, CaseConfig, FluidConfig, MonitorSettings, SamplingConfig,
};
pub use error::ConfigError;
pub use monitor::{MonitorBox, MonitorKind, ProbesFile, VolumeMonitor};
