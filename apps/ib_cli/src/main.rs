// apps/ib_cli/src/main.rs

//! IBFlow 命令行界面
//!
//! 浸入边界算例的后处理工具：生成物体标记点、在结构化场上取样、
//! 计算力系数、表面压力系数和回流区长度，生成求解器监测区文件。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// IBFlow 后处理命令行工具
#[derive(Parser)]
#[command(name = "ib_cli")]
#[command(author = "IBFlow Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "IBFlow immersed-boundary post-processing", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成物体标记点文件
    Body(commands::body::BodyArgs),
    /// 在结构化场上插值取样
    Sample(commands::sample::SampleArgs),
    /// 力历史 -> 力系数
    Forces(commands::forces::ForcesArgs),
    /// 圆柱表面压力系数
    Surface(commands::surface::SurfaceArgs),
    /// 回流区长度
    Wake(commands::wake::WakeArgs),
    /// 生成求解器体积监测区文件
    Probes(commands::probes::ProbesArgs),
    /// 显示信息
    Info(commands::info::InfoArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Body(args) => commands::body::execute(args),
        Commands::Sample(args) => commands::sample::execute(args),
        Commands::Forces(args) => commands::forces::execute(args),
        Commands::Surface(args) => commands::surface::execute(args),
        Commands::Wake(args) => commands::wake::execute(args),
        Commands::Probes(args) => commands::probes::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
