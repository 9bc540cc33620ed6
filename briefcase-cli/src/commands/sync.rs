//! `briefcase sync`: copy briefcase files into a project.
//!
//! Always exits 0 unless an unexpected I/O or lock-parse error occurs, so it
//! can run unconditionally from git hooks.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use briefcase_core::{layout::POST_SYNC_HOOK, GitCli};
use briefcase_sync::{
    pipeline, staleness::warning_message, HookOutcome, SyncAction, SyncConfig, SyncEvent,
    SyncReport,
};

use super::{warn, TargetArgs};

const PREFIX: &str = "briefcase";

/// Arguments for `briefcase sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Show what would change without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let config = self.target.resolve()?.with_dry_run(self.dry_run);
        let prefix = if config.dry_run { "[dry-run] " } else { "" };
        let report = pipeline::run_with_progress(&config, &GitCli::new(), |event| {
            print_event(event, &config, prefix)
        })
        .with_context(|| format!("sync failed for '{}'", config.target_dir.display()))?;
        print_outcome(&report);
        Ok(())
    }
}

/// Progress lines, printed as they happen so they precede any hook output.
fn print_event(event: SyncEvent<'_>, config: &SyncConfig, prefix: &str) {
    match event {
        SyncEvent::Behind(lag) => warn(
            PREFIX,
            &format!("WARNING — {}", warning_message(lag, &config.briefcase_dir)),
        ),
        SyncEvent::MappingEmpty => warn(
            PREFIX,
            &format!(
                "WARNING — no files found in briefcase for project '{}', skipping sync.",
                config.project
            ),
        ),
        SyncEvent::Action(action) => print_action(action, prefix),
    }
}

fn print_action(action: &SyncAction, prefix: &str) {
    match action {
        SyncAction::Synced { path } => println!("{PREFIX}: synced {path}"),
        SyncAction::Unchanged { .. } => {}
        SyncAction::Skipped { path } => warn(
            PREFIX,
            &format!("SKIPPING {path} (locally modified)"),
        ),
        SyncAction::Removed { path } => {
            println!("{PREFIX}: removed {path} (no longer in briefcase)")
        }
        SyncAction::WouldSync { path } => {
            println!("{prefix}{PREFIX}: would sync {}", path.cyan())
        }
        SyncAction::WouldRemove { path } => {
            println!("{prefix}{PREFIX}: would remove {}", path.red())
        }
    }
}

fn print_outcome(report: &SyncReport) {
    if report.briefcase_missing {
        warn(
            PREFIX,
            &format!(
                "WARNING — briefcase repo not found at '{}', skipping sync.",
                report.briefcase_dir.display()
            ),
        );
        return;
    }

    match &report.hook {
        HookOutcome::NotRun => {}
        HookOutcome::Ran { success: true } => println!("{PREFIX}: ran {POST_SYNC_HOOK}"),
        HookOutcome::Ran { success: false } => {
            warn(PREFIX, &format!("{POST_SYNC_HOOK} exited with an error"))
        }
        HookOutcome::Failed { reason } => {
            warn(PREFIX, &format!("could not run {POST_SYNC_HOOK}: {reason}"))
        }
    }
}
