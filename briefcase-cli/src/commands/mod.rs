pub mod build;
pub mod init;
pub mod status;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use briefcase_sync::{SyncConfig, SyncOverrides};

/// `--dir`, or the working directory, made absolute.
pub(crate) fn resolve_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("cannot determine working directory")?,
    };
    dir.canonicalize()
        .with_context(|| format!("cannot resolve path '{}'", dir.display()))
}

/// Target/briefcase selection shared by `sync` and `status`.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Project directory to sync into (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Briefcase directory (defaults to ../team-briefcase; BRIEFCASE_PATH wins).
    #[arg(long, value_name = "DIR")]
    pub briefcase: Option<PathBuf>,

    /// Project layer under config/ (defaults to the target directory name).
    #[arg(long)]
    pub project: Option<String>,

    /// Shared layer under config/.
    #[arg(long, value_name = "NAME")]
    pub shared: Option<String>,
}

impl TargetArgs {
    pub fn resolve(self) -> Result<SyncConfig> {
        let target = resolve_dir(self.target.as_deref())?;
        let config = SyncConfig::resolve(
            &target,
            SyncOverrides {
                briefcase: self.briefcase,
                project: self.project,
                shared: self.shared,
            },
        );
        tracing::debug!(
            "target {} <- briefcase {} (project '{}', shared '{}')",
            config.target_dir.display(),
            config.briefcase_dir.display(),
            config.project,
            config.shared_folder
        );
        Ok(config)
    }
}

/// Print a warning line to stderr.
pub(crate) fn warn(prefix: &str, message: &str) {
    eprintln!("{}: {}", prefix, message.yellow());
}
