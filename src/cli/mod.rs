//! CLI definitions and entry point.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// In-memory issue tracker HTTP service
#[derive(Parser, Debug)]
#[command(name = "issue-tracker", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (defaults to ./issue-tracker.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve(ServeArgs),

    /// Show the resolved configuration
    Config,

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Start with an empty store
    #[arg(long)]
    pub no_seed: bool,

    /// Largest accepted pageSize
    #[arg(long)]
    pub max_page_size: Option<i64>,
}
