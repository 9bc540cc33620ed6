//! `briefcase status`: per-file view of what the next sync would do.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use briefcase_sync::{status, FileStatus, StatusReport, SyncConfig};

use super::TargetArgs;

/// Arguments for `briefcase status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let config = self.target.resolve()?;
        let report = status::check(&config).with_context(|| {
            format!("status check failed for '{}'", config.target_dir.display())
        })?;

        if self.json {
            print_json(&config, &report)?;
        } else {
            print_table(&config, &report);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusReportJson<'a> {
    target: String,
    briefcase: String,
    project: &'a str,
    briefcase_missing: bool,
    source_commit: &'a str,
    files: &'a [briefcase_sync::status::ManagedFileStatus],
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "file")]
    path: String,
    #[tabled(rename = "status")]
    status: String,
}

fn print_json(config: &SyncConfig, report: &StatusReport) -> Result<()> {
    let payload = StatusReportJson {
        target: config.target_dir.display().to_string(),
        briefcase: config.briefcase_dir.display().to_string(),
        project: &config.project,
        briefcase_missing: report.briefcase_missing,
        source_commit: &report.source_commit,
        files: &report.files,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn status_label(status: FileStatus) -> String {
    let label = status.as_str().to_uppercase();
    match status {
        FileStatus::Current => label.green().to_string(),
        FileStatus::Modified => label.yellow().to_string(),
        FileStatus::Outdated | FileStatus::Pending => label.cyan().to_string(),
        FileStatus::Missing | FileStatus::Orphaned => label.red().to_string(),
    }
}

fn print_table(config: &SyncConfig, report: &StatusReport) {
    println!(
        "Briefcase v{} | project '{}' | {}",
        env!("CARGO_PKG_VERSION"),
        config.project,
        config.briefcase_dir.display()
    );
    if report.briefcase_missing {
        println!("{}", "briefcase repo not found".red());
    }

    if report.files.is_empty() {
        println!("No managed files.");
        return;
    }

    let rows: Vec<StatusTableRow> = report
        .files
        .iter()
        .map(|f| StatusTableRow {
            path: f.path.clone(),
            status: status_label(f.status),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    let attention = report
        .files
        .iter()
        .filter(|f| f.status.needs_attention())
        .count();
    if attention > 0 {
        println!("{attention} file(s) differ from the briefcase; run 'briefcase sync' to reconcile.");
    }
}
