use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "hubsystem", version, about = "HubSystem station terminal")]
pub struct Cli {
    /// Ollama server address (default: http://localhost:30105)
    #[arg(long = "host")]
    pub host: Option<String>,

    /// Model identifier (default: qwen2.5:0.5b)
    #[arg(long = "model")]
    pub model: Option<String>,

    /// Explicit config file path
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Skip the routine maintenance exchange at startup
    #[arg(long = "no-maintenance")]
    pub no_maintenance: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
