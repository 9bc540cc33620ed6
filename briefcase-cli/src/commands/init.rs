//! `briefcase init [--dir <path>]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use briefcase_build::{init, InitEntry};

/// Scaffold a briefcase directory.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to scaffold (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let dir = super::resolve_dir(self.dir.as_deref())?;
        let entries =
            init(&dir).with_context(|| format!("failed to scaffold '{}'", dir.display()))?;

        let mut created_any = false;
        for entry in &entries {
            match entry {
                InitEntry::Created { path } => {
                    created_any = true;
                    println!("  created: {path}");
                }
                InitEntry::Skipped { path } => println!("  skipped: {path} (already exists)"),
            }
        }
        if !created_any {
            println!("briefcase-init: everything already exists, nothing to do.");
        }
        Ok(())
    }
}
