//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Terminal client for a remote REPL server
#[derive(Parser, Debug)]
#[command(name = "gosp")]
#[command(about = "Evaluate expressions on a remote REPL server", long_about = None)]
#[command(version)]
pub struct Args {
    /// Server base URL; overrides the config file
    #[arg(long, env = "GOSP_URL")]
    pub url: Option<String>,

    /// TOML config file (base_url, routes, user_agent)
    #[arg(long, env = "GOSP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
