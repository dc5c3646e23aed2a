// apps/ib_cli/src/commands/wake.rs

//! 回流区长度
//!
//! 沿经过圆心的水平线提取 `u(x)`，在物体后方寻找 `u = v_x` 的位置。
//! `v_x` 取快照时刻物体 x 方向速度（带符号），尾迹位于运动方向的反侧。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ib_io::read_field_snapshot;
use ib_post::{horizontal_profile, recirculation_length};
use tracing::info;

/// 回流区参数
#[derive(Args)]
pub struct WakeArgs {
    /// 二维 u 速度场快照 (JSON)
    #[arg(short, long)]
    pub field: PathBuf,

    /// 算例配置文件
    #[arg(short, long)]
    pub config: PathBuf,

    /// 快照时刻，缺省取快照记录的时刻
    #[arg(short, long)]
    pub time: Option<f64>,

    /// 物体后方忽略的距离
    #[arg(long, default_value_t = 0.01)]
    pub buffer: f64,
}

/// 执行回流区计算
pub fn execute(args: WakeArgs) -> Result<()> {
    let (length, diameter) = recirculation(&args)?;
    println!("recirculation length L = {:.6} (L/D = {:.6})", length, length / diameter);
    Ok(())
}

/// 回流区长度与物体直径
fn recirculation(args: &WakeArgs) -> Result<(f64, f64)> {
    let case = super::load_case(&args.config)?;
    let snapshot = read_field_snapshot(&args.field)
        .with_context(|| format!("无法读取场快照 {}", args.field.display()))?;
    let time = args.time.unwrap_or(snapshot.time);
    let u = snapshot.into_field().context("场快照数据无效")?;

    let center = case.motion.center_at(case.body.center3(), time);
    let v_x = case.motion.velocity(time)[0];

    let line = horizontal_profile(&u, center[1], case.sampling.boundary_policy)?;
    let length = recirculation_length(
        line.axis().values(),
        line.values(),
        center[0],
        case.body.radius,
        v_x,
        args.buffer,
    )?;

    info!(
        "body center ({:.4}, {:.4}), v_x = {} at t = {}",
        center[0], center[1], v_x, time
    );
    Ok((length, case.body.diameter()))
}
