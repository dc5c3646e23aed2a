// apps/ib_cli/src/commands/probes.rs

//! 生成求解器体积监测区文件 (probes.yaml)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

/// 监测区文件参数
#[derive(Args)]
pub struct ProbesArgs {
    /// 算例配置文件
    #[arg(short, long)]
    pub config: PathBuf,

    /// 输出 YAML
    #[arg(short, long, default_value = "probes.yaml")]
    pub output: PathBuf,
}

/// 执行监测区文件生成
pub fn execute(args: ProbesArgs) -> Result<()> {
    let case = super::load_case(&args.config)?;
    let file = case.monitor_file().context("监测区设置无效")?;
    file.save(&args.output)
        .with_context(|| format!("无法写入 {}", args.output.display()))?;

    for m in &file.probes {
        info!("{} ({}) x = {:?}, y = {:?}", m.name, m.field, m.region.x, m.region.y);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ib_config::{CaseConfig, ProbesFile};

    #[test]
    fn test_monitor_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut case = CaseConfig::cylinder(0.5);
        case.body.center = vec![2.0, -1.0];
        case.monitors.fields = vec!["p".into(), "u".into()];
        let config = dir.path().join("case.yaml");
        case.save(&config).unwrap();

        let output = dir.path().join("probes.yaml");
        execute(ProbesArgs {
            config,
            output: output.clone(),
        })
        .unwrap();

        let file = ProbesFile::load(&output).unwrap();
        assert_eq!(file, case.monitor_file().unwrap());
        assert_eq!(file.probes[1].path, "solution/probe-u.h5");
        assert_eq!(file.probes[0].region.x, [1.25, 2.75]);
        assert_eq!(file.probes[0].region.y, [-1.75, -0.25]);
    }
}
