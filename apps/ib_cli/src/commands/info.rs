// apps/ib_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示版本、默认算例配置，或给定配置派生出的取样参数。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ib_config::{BodyShape, CaseConfig};
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 算例配置文件
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 以 JSON 打印默认配置
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== IBFlow 信息 ===");
    print_system_info();

    if args.defaults {
        println!();
        println!("=== 默认配置 ===");
        println!("{}", CaseConfig::cylinder(0.5).to_json()?);
    }

    if let Some(path) = &args.config {
        let case = super::load_case(path)?;
        println!();
        print_case_summary(&case).context("无法派生取样参数")?;
    }

    Ok(())
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("IBFlow CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
    println!("并行线程数: {}", available_threads());
}

fn print_case_summary(case: &CaseConfig) -> Result<()> {
    println!("=== 算例 ===");
    println!("物体: {:?}, R = {}, 中心 {:?}", case.body.shape, case.body.radius, case.body.center);
    println!("运动: {}", case.motion.name());
    if let Some(period) = case.motion.period() {
        println!("  周期 T = {period}, 最大速度 {}", case.motion.max_velocity());
    }
    println!("标记点间距: {}", case.marker_spacing());
    if case.body.shape == BodyShape::Circle {
        println!("圆周标记点数: {}", case.marker_count()?);
        println!("压力取样环半径: {}", case.sampling_radius());
    } else {
        println!("球面标记点数: {}", case.build_markers()?.len());
    }
    println!("边界策略: {}", case.sampling.boundary_policy.name());
    let scales = case.fluid.scales();
    println!("动压 ½ρU²: {}", scales.dynamic_pressure());
    Ok(())
}

fn available_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}
