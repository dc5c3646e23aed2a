// apps/ib_cli/src/commands/forces.rs

//! 力历史 -> 力系数
//!
//! 维数取自物体形状（圆柱 2 维，球 3 维），多物体文件只取第一个物体。
//! 振荡物体先加回附加质量力再无量纲化；配置给出平均时间窗时
//! 同时输出平均系数。

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ib_body::Motion;
use ib_config::BodyShape;
use ib_io::{read_forces_with_dim, write_columns};
use ib_post::{added_mass_correction, force_coefficients};
use tracing::info;

/// 力系数参数
#[derive(Args)]
pub struct ForcesArgs {
    /// 求解器输出的力历史文件
    #[arg(short, long)]
    pub forces: PathBuf,

    /// 算例配置文件
    #[arg(short, long)]
    pub config: PathBuf,

    /// 输出 CSV (t, cd, cl[, cz])
    #[arg(short, long)]
    pub output: PathBuf,
}

/// 执行力系数计算
pub fn execute(args: ForcesArgs) -> Result<()> {
    let case = super::load_case(&args.config)?;
    let dim = match case.body.shape {
        BodyShape::Circle => 2,
        BodyShape::Sphere => 3,
    };
    let mut history = read_forces_with_dim(&args.forces, dim)
        .with_context(|| format!("无法读取力历史 {}", args.forces.display()))?;

    if matches!(case.motion, Motion::Oscillating { .. }) {
        added_mass_correction(
            &mut history.fx,
            &history.times,
            case.fluid.density,
            case.body.volume(),
            &case.motion,
        )?;
    }

    let scales = case.fluid.scales();
    scales.validate()?;
    let coeffs = force_coefficients(&history, scales.force_factor());

    let mut headers = vec!["t", "cd", "cl"];
    let mut columns = vec![coeffs.times.clone(), coeffs.cd.clone(), coeffs.cl.clone()];
    if let Some(cz) = &coeffs.cz {
        headers.push("cz");
        columns.push(cz.clone());
    }
    write_columns(&args.output, &headers, &columns)
        .with_context(|| format!("无法写入 {}", args.output.display()))?;
    info!("{} force records -> {}", coeffs.len(), args.output.display());

    if let Some(window) = case.averaging {
        let mean = coeffs.mean(window)?;
        println!("mean over [{}, {}]: Cd = {:.6}, Cl = {:.6}", window.0, window.1, mean.cd, mean.cl);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ib_config::CaseConfig;
    use ib_io::{load_columns, CsvConfig};
    use std::path::Path;

    fn run(dir: &Path, case: &CaseConfig, forces: &str) -> Result<Vec<Vec<f64>>> {
        let config = dir.join("case.yaml");
        case.save(&config)?;
        let forces_path = dir.join("forces.txt");
        std::fs::write(&forces_path, forces)?;
        let output = dir.join("coeffs.csv");
        execute(ForcesArgs {
            forces: forces_path,
            config,
            output: output.clone(),
        })?;
        Ok(load_columns(&output, &CsvConfig::default())?)
    }

    #[test]
    fn test_cylinder_coefficients() {
        // ρ = U = 1, L = 1: C = 2F
        let dir = tempfile::tempdir().unwrap();
        let cols = run(
            dir.path(),
            &CaseConfig::cylinder(0.5),
            "# t fx fy\n0.0 0.5 0.1\n0.1 0.75 -0.2\n",
        )
        .unwrap();

        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0], vec![0.0, 0.1]);
        assert!((cols[1][0] - 1.0).abs() < 1e-12);
        assert!((cols[1][1] - 1.5).abs() < 1e-12);
        assert!((cols[2][1] + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_reads_ambiguous_width_as_3d() {
        // 7 列：两个三维物体，取第一个
        let mut case = CaseConfig::cylinder(0.5);
        case.body.shape = BodyShape::Sphere;
        case.body.center = vec![0.0, 0.0, 0.0];
        case.body.spacing = Some(0.1);

        let dir = tempfile::tempdir().unwrap();
        let cols = run(
            dir.path(),
            &case,
            "0.0 0.5 0.25 0.125 9 9 9\n1.0 1.0 0.5 0.25 9 9 9\n",
        )
        .unwrap();

        assert_eq!(cols.len(), 4);
        assert!((cols[1][1] - 2.0).abs() < 1e-12);
        assert!((cols[3][0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_cylinder_rejects_3d_rows() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            dir.path(),
            &CaseConfig::cylinder(0.5),
            "0.0 0.5 0.25 0.125\n",
        );
        assert!(result.is_err());
    }
}
