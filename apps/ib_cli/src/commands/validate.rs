// apps/ib_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 先做结构校验（`CaseConfig::validate`），再检查取样参数是否合理。

use std::path::Path;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use ib_body::Motion;
use ib_config::{BodyShape, CaseConfig};
use tracing::{error, info, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 算例配置文件
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== IBFlow 配置验证 ===");

    let mut result = ValidationResult::default();
    validate_config(&args.config, &mut result);
    print_validation_result(&result, args.strict)
}

fn validate_config(path: &Path, result: &mut ValidationResult) {
    println!("\n检查配置文件: {}", path.display());

    let case = match CaseConfig::read(path) {
        Ok(case) => case,
        Err(e) => {
            result.add_error(e.to_string());
            return;
        }
    };

    if let Err(e) = case.validate() {
        result.add_error(e.to_string());
        return;
    }
    check_sampling(&case, result);
}

fn check_sampling(case: &CaseConfig, result: &mut ValidationResult) {
    // 正则化 delta 函数支撑区约 2 个网格
    if case.sampling.offset_cells < 2.0 {
        result.add_warning(format!(
            "offset_cells = {} 小于 2，压力取样点落在 delta 函数支撑区内",
            case.sampling.offset_cells
        ));
    }

    let ratio = case.marker_spacing() / case.sampling.grid_spacing;
    if !(0.5..=2.0).contains(&ratio) {
        result.add_warning(format!(
            "标记点间距是网格间距的 {ratio:.2} 倍，通常取 1"
        ));
    }

    if let (BodyShape::Circle, Some(n), Some(_)) =
        (case.body.shape, case.body.markers, case.body.spacing)
    {
        result.add_warning(format!("显式指定了 {n} 个标记点，spacing 只用于取样间距比检查"));
    }

    if let Motion::Oscillating { .. } = case.motion {
        if case.averaging.is_none() {
            result.add_warning("振荡算例未设置 averaging 时间窗");
        }
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("{}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("{}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    if result.is_ok(strict) {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
