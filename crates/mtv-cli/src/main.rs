//! `mtv` - render agent search traces as chart scenes.
//!
//! Reads a planning trace (or a saved session log), rebuilds the search
//! tree and prints a JSON scene for a plotting front end. Logs go to stderr.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mtv_cli::commands::{self, RenderArgs, ReplayArgs, TreeArgs};
use mtv_cli::MtvConfig;

#[derive(Parser)]
#[command(name = "mtv")]
#[command(version, about = "Search trace visualizer for planning agents", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/mtv/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, overriding the config file (RUST_LOG wins over both)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chart scene of a trace as JSON
    Render(RenderArgs),

    /// Print an indented outline of a trace's search tree
    Tree(TreeArgs),

    /// Render every trace found in a saved session log
    Replay(ReplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = MtvConfig::resolve(cli.config.as_deref())?;

    let filter = cli.log_level.as_deref().unwrap_or(&config.logging.filter);
    init_logging(filter);

    match cli.command {
        Commands::Render(args) => commands::render(args, &config),
        Commands::Tree(args) => commands::tree(args, &config),
        Commands::Replay(args) => commands::replay(args, &config),
    }
}

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
