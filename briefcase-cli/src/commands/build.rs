//! `briefcase build`: expand `config-src/` into `config/`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use briefcase_build::{build, BuildEntry, BuildReport};
use briefcase_core::GitCli;

/// Arguments for `briefcase build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Briefcase directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl BuildArgs {
    pub fn run(self) -> Result<ExitCode> {
        let dir = super::resolve_dir(self.dir.as_deref())?;
        tracing::debug!("building {}", dir.display());
        let report = build(&dir, &GitCli::new())
            .with_context(|| format!("build failed in '{}'", dir.display()))?;
        print_report(&report);
        Ok(if report.exit_code() == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        })
    }
}

fn print_report(report: &BuildReport) {
    if report.source_missing {
        println!("briefcase-build: no config-src/ directory, nothing to build.");
        return;
    }

    for entry in &report.entries {
        match entry {
            BuildEntry::Created { path } => println!("  {}: {path}", "created".green()),
            BuildEntry::Updated { path } => println!("  {}: {path}", "updated".cyan()),
            BuildEntry::Unchanged { path } => println!("  unchanged: {path}"),
            BuildEntry::Removed { path } => println!("  {}: {path}", "removed".red()),
        }
    }

    if !report.unstaged.is_empty() {
        println!("briefcase-build: config/ files need to be staged:");
        for path in &report.unstaged {
            println!("  unstaged: {path}");
        }
    }
}
