// apps/ib_cli/src/commands/sample.rs

//! 在结构化场快照上取样
//!
//! 取样点来自 .body 文件。场的坐标轴顺序为 `[y, x]` 或 `[z, y, x]`，
//! 因此标记点坐标要按轴顺序重排。

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use ib_interp::{BoundaryPolicy, ChainedSampler};
use ib_io::{read_body, read_field_snapshot, write_columns};
use tracing::info;

/// 取样参数
#[derive(Args)]
pub struct SampleArgs {
    /// 场快照 (JSON)
    #[arg(short, long)]
    pub field: PathBuf,

    /// 取样点 (.body 文件)
    #[arg(short, long)]
    pub points: PathBuf,

    /// 输出 CSV
    #[arg(short, long)]
    pub output: PathBuf,

    /// 越界策略 (extrapolate, clamp, error)
    #[arg(long, default_value = "extrapolate")]
    pub policy: BoundaryPolicy,
}

/// 执行取样
pub fn execute(args: SampleArgs) -> Result<()> {
    let snapshot = read_field_snapshot(&args.field)
        .with_context(|| format!("无法读取场快照 {}", args.field.display()))?;
    let name = snapshot.name.clone();
    let field = snapshot.into_field().context("场快照数据无效")?;
    let markers = read_body(&args.points)
        .with_context(|| format!("无法读取取样点 {}", args.points.display()))?;

    let points: Vec<Vec<f64>> = match (field.ndim(), markers.dim()) {
        (2, 2) => markers.points().map(|p| vec![p[1], p[0]]).collect(),
        (3, 3) => markers.points().map(|p| vec![p[2], p[1], p[0]]).collect(),
        (ndim, dim) => bail!("{ndim} 维场无法用 {dim} 维标记点取样"),
    };

    let values = ChainedSampler::new(&field)
        .with_policy(args.policy)
        .sample_points(&points)?;

    let mut headers = vec!["x", "y"];
    let mut columns = vec![markers.x.clone(), markers.y.clone()];
    if field.ndim() == 3 {
        if let Some(z) = &markers.z {
            headers.push("z");
            columns.push(z.clone());
        }
    }
    headers.push(name.as_str());
    columns.push(values);

    write_columns(&args.output, &headers, &columns)
        .with_context(|| format!("无法写入 {}", args.output.display()))?;

    info!(
        "sampled '{}' at {} points ({} policy) -> {}",
        name,
        points.len(),
        args.policy.name(),
        args.output.display()
    );
    Ok(())
}
