//! Battle simulator CLI.
//!
//! Run with: `cargo run -p battle-sim -- <command>`

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{Batch, List, Replay, Run};

/// Balance testing and replay tools for the battle engine
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Balance testing and replay tools for the battle engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory holding config.toml and catalog/ (defaults to built-in content)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one battle and print its event log
    Run(Run),

    /// Play many seeds and report aggregate results
    Batch(Batch),

    /// Replay a transcript and check its final digest
    Replay(Replay),

    /// List encounters and parties in the catalog
    List(List),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let content = commands::Content::load(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Run(cmd) => cmd.execute(&content),
        Command::Batch(cmd) => cmd.execute(&content),
        Command::Replay(cmd) => cmd.execute(&content),
        Command::List(cmd) => cmd.execute(&content),
    }
}
