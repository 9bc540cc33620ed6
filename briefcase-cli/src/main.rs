//! Briefcase: distribute AI agent configuration from one repository to many.
//!
//! # Usage
//!
//! ```text
//! briefcase build [--dir <briefcase>]
//! briefcase sync [--target <dir>] [--briefcase <dir>] [--project <name>] [--shared <name>] [--dry-run]
//! briefcase status [--target <dir>] [--briefcase <dir>] [--project <name>] [--shared <name>] [--json]
//! briefcase init [--dir <briefcase>]
//! ```

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{build::BuildArgs, init::InitArgs, status::StatusArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "briefcase",
    version,
    about = "Share AI coding agent configuration across repositories",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand includes in config-src/ into config/ (exit 1 if anything changed).
    Build(BuildArgs),

    /// Copy briefcase files into a project, keeping local edits.
    Sync(SyncArgs),

    /// Show the state of every managed file in a project.
    Status(StatusArgs),

    /// Scaffold a new briefcase directory.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => args.run(),
        Commands::Sync(args) => args.run().map(|()| ExitCode::SUCCESS),
        Commands::Status(args) => args.run().map(|()| ExitCode::SUCCESS),
        Commands::Init(args) => args.run().map(|()| ExitCode::SUCCESS),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
