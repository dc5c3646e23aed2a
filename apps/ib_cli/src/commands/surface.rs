// apps/ib_cli/src/commands/surface.rs

//! 圆柱表面压力系数
//!
//! 在物体外侧 `offset_cells` 个网格处的同心圆上取样，输出上下表面
//! 从前驻点到后驻点的 Cp 分布。

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use ib_config::BodyShape;
use ib_io::{read_field_snapshot, write_columns};
use ib_post::SurfacePressure;
use tracing::info;

/// 表面压力参数
#[derive(Args)]
pub struct SurfaceArgs {
    /// 二维压力场快照 (JSON)
    #[arg(short, long)]
    pub field: PathBuf,

    /// 算例配置文件
    #[arg(short, long)]
    pub config: PathBuf,

    /// 输出 CSV (theta, cp_lower, cp_upper)
    #[arg(short, long)]
    pub output: PathBuf,

    /// 快照时刻，运动物体据此确定圆心
    #[arg(short, long)]
    pub time: Option<f64>,
}

/// 执行表面压力计算
pub fn execute(args: SurfaceArgs) -> Result<()> {
    let case = super::load_case(&args.config)?;
    if case.body.shape != BodyShape::Circle {
        bail!("表面压力系数仅支持圆柱");
    }

    let snapshot = read_field_snapshot(&args.field)
        .with_context(|| format!("无法读取场快照 {}", args.field.display()))?;
    let time = args.time.unwrap_or(snapshot.time);
    let pressure = snapshot.into_field().context("场快照数据无效")?;

    let center = case.motion.center_at(case.body.center3(), time);
    let ring = SurfacePressure::outside_body(
        (center[0], center[1]),
        case.body.radius,
        case.marker_count()?,
        case.sampling.grid_spacing,
        case.sampling.offset_cells,
    )?;
    let cp = ring.coefficients(
        &pressure,
        &case.fluid.scales(),
        case.fluid.far_pressure,
        case.sampling.boundary_policy,
    )?;
    let (lower, upper) = cp.split()?;

    write_columns(
        &args.output,
        &["theta", "cp_lower", "cp_upper"],
        &[lower.theta_deg, lower.cp, upper.cp],
    )
    .with_context(|| format!("无法写入 {}", args.output.display()))?;

    info!(
        "surface cp on R = {:.4} at t = {} -> {}",
        ring.radius,
        time,
        args.output.display()
    );
    Ok(())
}
