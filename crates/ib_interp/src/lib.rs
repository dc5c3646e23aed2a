// crates/ib_interp/src/lib.rs

//! IBFlow 插值核心
//!
//! 浸入边界求解器输出的是结构化笛卡尔网格上的场，后处理中的
//! 所有取样（表面压力、尾迹剖面、网格收敛性对比）都归结为
//! 沿坐标轴逐维的线性插值。
//!
//! # 模块
//!
//! - [`axis`]: 一维坐标轴与线性插值器
//! - [`field`]: 1~3 维结构化场
//! - [`chained`]: 逐轴链式点采样

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod axis;
pub mod chained;
pub mod field;

// 重导出常用类型
pub use axis::{
    interpolate, AxisInterpolator, BoundaryPolicy, Bracket, FieldSlice, SampleAxis,
    FAR_EXTRAPOLATION,
};
pub use chained::{sample_point, BatchSamples, ChainedSampler};
pub use field::StructuredField;
