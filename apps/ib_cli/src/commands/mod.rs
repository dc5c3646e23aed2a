// apps/ib_cli/src/commands/mod.rs

//! 子命令实现

pub mod body;
pub mod forces;
pub mod info;
pub mod probes;
pub mod sample;
pub mod surface;
pub mod validate;
pub mod wake;

use std::path::Path;

use anyhow::{Context, Result};
use ib_config::CaseConfig;

/// 加载并校验算例配置
pub(crate) fn load_case(path: &Path) -> Result<CaseConfig> {
    CaseConfig::load(path).with_context(|| format!("无法加载算例配置 {}", path.display()))
}
