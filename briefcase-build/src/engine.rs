//! Build engine: `config-src/` → `config/`.
//!
//! 1. Enumerate `config-src/` (sorted), skipping `_includes/`.
//! 2. Resolve includes per file; write only when the output differs.
//! 3. Delete outputs with no source, pruning emptied directories.
//! 4. If nothing changed on disk, ask version control whether `config/` has
//!    unstaged or untracked files.
//!
//! The verdict is 0 when the tree is up to date and fully staged, 1 otherwise.

use std::collections::BTreeSet;
use std::path::Path;

use briefcase_core::{
    error::io_err,
    fsutil::{self, relative_key},
    layout::{self, CONFIG_OUT, INCLUDES_DIR},
    VcsError, VersionControl,
};

use crate::error::BuildError;
use crate::include::resolve_includes;

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEntry {
    Created { path: String },
    Updated { path: String },
    Unchanged { path: String },
    /// Output with no matching source; deleted.
    Removed { path: String },
}

impl BuildEntry {
    /// Output path relative to `config/`.
    pub fn path(&self) -> &str {
        match self {
            BuildEntry::Created { path }
            | BuildEntry::Updated { path }
            | BuildEntry::Unchanged { path }
            | BuildEntry::Removed { path } => path,
        }
    }
}

/// Outcome of a build run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// `config-src/` does not exist; nothing was done.
    pub source_missing: bool,
    /// Per-file results: sources in sorted order, then removals.
    pub entries: Vec<BuildEntry>,
    /// Files under `config/` still needing `git add` (only consulted when
    /// nothing changed on disk).
    pub unstaged: Vec<String>,
}

impl BuildReport {
    /// `true` if any output file was written or removed.
    pub fn changed(&self) -> bool {
        self.entries
            .iter()
            .any(|e| !matches!(e, BuildEntry::Unchanged { .. }))
    }

    /// 0 when up to date and staged, 1 when files changed or need staging.
    pub fn exit_code(&self) -> i32 {
        if self.changed() || !self.unstaged.is_empty() {
            1
        } else {
            0
        }
    }
}

/// Build `<briefcase>/config/` from `<briefcase>/config-src/`.
///
/// Include errors and filesystem errors abort the build. Version-control
/// failures never do: a briefcase outside a repository simply has nothing to
/// stage.
pub fn build(briefcase: &Path, vcs: &dyn VersionControl) -> Result<BuildReport, BuildError> {
    let src_root = layout::source_root(briefcase);
    let out_root = layout::output_root(briefcase);
    let includes_dir = layout::includes_dir(briefcase);

    if !src_root.is_dir() {
        tracing::debug!("no {} in {}", src_root.display(), briefcase.display());
        return Ok(BuildReport {
            source_missing: true,
            ..BuildReport::default()
        });
    }

    let mut report = BuildReport::default();
    let mut produced: BTreeSet<String> = BTreeSet::new();

    for src in fsutil::collect_files(&src_root)? {
        let Some(key) = relative_key(&src, &src_root) else {
            continue;
        };
        if key.split('/').next() == Some(INCLUDES_DIR) {
            continue;
        }

        let dest = out_root.join(&key);
        let rendered = render(&src, &includes_dir)?;
        produced.insert(key.clone());

        let entry = match fsutil::read_if_exists(&dest)? {
            Some(existing) if existing == rendered => {
                tracing::debug!("unchanged: {key}");
                BuildEntry::Unchanged { path: key }
            }
            existing => {
                fsutil::atomic_write(&dest, &rendered)?;
                if existing.is_some() {
                    tracing::info!("updated: {key}");
                    BuildEntry::Updated { path: key }
                } else {
                    tracing::info!("created: {key}");
                    BuildEntry::Created { path: key }
                }
            }
        };
        report.entries.push(entry);
    }

    for stale in fsutil::collect_files(&out_root)? {
        let Some(key) = relative_key(&stale, &out_root) else {
            continue;
        };
        if produced.contains(&key) {
            continue;
        }
        std::fs::remove_file(&stale).map_err(|e| io_err(&stale, e))?;
        fsutil::prune_empty_parents(&stale, &out_root);
        tracing::info!("removed: {key}");
        report.entries.push(BuildEntry::Removed { path: key });
    }

    if report.changed() {
        return Ok(report);
    }

    report.unstaged = match vcs.unstaged_paths(briefcase, CONFIG_OUT) {
        Ok(paths) => paths,
        Err(VcsError::NotARepository { .. } | VcsError::Spawn { .. }) => {
            tracing::debug!("{} is not under version control", briefcase.display());
            Vec::new()
        }
        Err(err) => {
            tracing::warn!("could not check staging status of {CONFIG_OUT}/: {err}");
            Vec::new()
        }
    };
    Ok(report)
}

/// Resolved bytes for one source file. Non-UTF-8 files pass through as-is.
fn render(src: &Path, includes_dir: &Path) -> Result<Vec<u8>, BuildError> {
    let bytes = std::fs::read(src).map_err(|e| io_err(src, e))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(resolve_includes(&text, includes_dir)?.into_bytes()),
        Err(raw) => Ok(raw.into_bytes()),
    }
}
