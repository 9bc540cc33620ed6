//! Read-only classification of a target's managed files.
//!
//! Precedence per path:
//! 1. `Orphaned` (tracked in the lock, gone from the briefcase)
//! 2. `Pending` (in the briefcase, never synced)
//! 3. `Missing` (tracked, deleted locally)
//! 4. `Modified` (local content differs from the locked hash)
//! 5. `Outdated` (local content pristine, briefcase source changed)
//! 6. `Current`

use std::collections::BTreeSet;

use serde::Serialize;

use crate::collect::collect_files;
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::lock::{self, hash_file};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Current,
    Modified,
    Outdated,
    Missing,
    Orphaned,
    Pending,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Current => "current",
            FileStatus::Modified => "modified",
            FileStatus::Outdated => "outdated",
            FileStatus::Missing => "missing",
            FileStatus::Orphaned => "orphaned",
            FileStatus::Pending => "pending",
        }
    }

    /// Whether the next sync would change (or refuse to change) this path.
    pub fn needs_attention(self) -> bool {
        !matches!(self, FileStatus::Current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagedFileStatus {
    pub path: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub briefcase_missing: bool,
    pub source_commit: String,
    pub files: Vec<ManagedFileStatus>,
}

/// Classify every path tracked in the target's lock or offered by the
/// briefcase. Nothing is written.
pub fn check(config: &SyncConfig) -> Result<StatusReport, SyncError> {
    let lock = lock::load_at(&config.target_dir)?;
    let briefcase_missing = !config.briefcase_dir.is_dir();
    let mapping = if briefcase_missing {
        Default::default()
    } else {
        collect_files(&config.briefcase_dir, &config.project, &config.shared_folder)?
    };

    let keys: BTreeSet<&String> = lock.files.keys().chain(mapping.keys()).collect();
    let mut files = Vec::with_capacity(keys.len());
    for key in keys {
        let status = match (lock.files.get(key), mapping.get(key)) {
            (Some(_), None) => FileStatus::Orphaned,
            (None, _) => FileStatus::Pending,
            (Some(entry), Some(src)) => {
                let dest = config.target_dir.join(key);
                if !dest.exists() {
                    FileStatus::Missing
                } else if hash_file(&dest)? != entry.sha256 {
                    FileStatus::Modified
                } else if hash_file(src)? != entry.sha256 {
                    FileStatus::Outdated
                } else {
                    FileStatus::Current
                }
            }
        };
        files.push(ManagedFileStatus {
            path: key.clone(),
            status,
        });
    }

    Ok(StatusReport {
        briefcase_missing,
        source_commit: lock.source_commit,
        files,
    })
}
