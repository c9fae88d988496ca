use clap::Parser;
use std::path::PathBuf;

/// Ollama 中继代理命令行参数
#[derive(Parser, Debug)]
#[command(name = "ollama-relay", version, about = "HTTP relay for an Ollama-compatible API")]
pub struct Cli {
    /// 自定义 .env 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 监听地址（覆盖 HOST）
    #[arg(long)]
    pub host: Option<String>,

    /// 监听端口（覆盖 PORT）
    #[arg(short, long)]
    pub port: Option<u16>,

    /// 启用调试日志
    #[arg(short, long)]
    pub debug: bool,

    /// 启用 trace 级别日志
    #[arg(short, long)]
    pub verbose: bool,
}
