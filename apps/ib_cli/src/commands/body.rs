// apps/ib_cli/src/commands/body.rs

//! 生成物体标记点文件

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ib_io::write_body;
use tracing::info;

/// 标记点生成参数
#[derive(Args)]
pub struct BodyArgs {
    /// 算例配置文件
    #[arg(short, long)]
    pub config: PathBuf,

    /// 输出 .body 文件
    #[arg(short, long)]
    pub output: PathBuf,
}

/// 执行标记点生成
pub fn execute(args: BodyArgs) -> Result<()> {
    let case = super::load_case(&args.config)?;
    let markers = case.build_markers().context("生成标记点失败")?;

    write_body(&args.output, &markers)
        .with_context(|| format!("无法写入 {}", args.output.display()))?;

    info!(
        "{:?} body: {} markers (ds = {}) -> {}",
        case.body.shape,
        markers.len(),
        case.marker_spacing(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ib_config::{BodyShape, CaseConfig};
    use ib_io::read_body;

    #[test]
    fn test_body_from_yaml_case() {
        let dir = tempfile::tempdir().unwrap();
        let mut case = CaseConfig::cylinder(0.5);
        case.body.markers = Some(32);
        let config = dir.path().join("case.yaml");
        case.save(&config).unwrap();

        let output = dir.path().join("cylinder.body");
        execute(BodyArgs {
            config,
            output: output.clone(),
        })
        .unwrap();

        let markers = read_body(&output).unwrap();
        assert_eq!(markers.len(), 32);
        assert_eq!(markers.dim(), 2);
        assert!(markers
            .points()
            .all(|p| ((p[0] * p[0] + p[1] * p[1]).sqrt() - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_sphere_body() {
        let dir = tempfile::tempdir().unwrap();
        let mut case = CaseConfig::cylinder(0.5);
        case.body.shape = BodyShape::Sphere;
        case.body.center = vec![1.0, 0.0, 0.0];
        case.body.spacing = Some(0.2);
        let config = dir.path().join("case.json");
        case.save(&config).unwrap();

        let output = dir.path().join("sphere.body");
        execute(BodyArgs {
            config,
            output: output.clone(),
        })
        .unwrap();

        let markers = read_body(&output).unwrap();
        assert_eq!(markers.dim(), 3);
        let c = markers.centroid().unwrap();
        assert!((c[0] - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_invalid_case_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut case = CaseConfig::cylinder(0.5);
        case.body.markers = Some(7);
        let config = dir.path().join("case.yaml");
        case.save(&config).unwrap();

        let output = dir.path().join("bad.body");
        assert!(execute(BodyArgs {
            config,
            output: output.clone(),
        })
        .is_err());
        assert!(!output.exists());
    }
}
