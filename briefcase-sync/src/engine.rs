//! Sync engine: copy briefcase files into a target, protecting local edits.
//!
//! ## Per-file protocol
//!
//! 1. Hash the briefcase source.
//! 2. Destination absent → copy.
//! 3. Destination tracked in the lock and its hash differs from the locked
//!    hash → local edit: keep it, record its current hash, report `Skipped`.
//! 4. Destination already equal to the source → leave it, report `Unchanged`.
//! 5. Otherwise (tracked and pristine, or not tracked at all) → overwrite.
//!
//! A destination with no lock entry is always overwritten, so a file that
//! merely occupies a newly managed path is adopted without warning.
//!
//! A kept local edit is protected for one run only. Its hash is recorded in
//! the lock, so the following sync sees it as pristine and overwrites it.

use std::path::{Component, Path};

use briefcase_core::{
    error::io_err,
    fsutil::{self, relative_key},
};

use crate::collect::SyncMapping;
use crate::error::SyncError;
use crate::lock::{hash_file, LockEntry, LockFile, ManagedFiles};

/// Outcome for one destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copied from the briefcase.
    Synced { path: String },
    /// Already identical to the briefcase source.
    Unchanged { path: String },
    /// Edited locally since the last sync; left alone.
    Skipped { path: String },
    /// No longer in the briefcase; deleted from the target.
    Removed { path: String },
    /// `--dry-run`: would have been copied.
    WouldSync { path: String },
    /// `--dry-run`: would have been deleted.
    WouldRemove { path: String },
}

/// Result of [`sync_files`]: the new lock entries plus what happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub managed: ManagedFiles,
    pub actions: Vec<SyncAction>,
}

/// Sync every entry of `mapping` into `target`.
pub fn sync_files(
    mapping: &SyncMapping,
    old_lock: &LockFile,
    briefcase: &Path,
    target: &Path,
    dry_run: bool,
) -> Result<SyncOutcome, SyncError> {
    let mut outcome = SyncOutcome::default();

    for (dest_rel, src) in mapping {
        let dest = target.join(dest_rel);
        let source = relative_key(src, briefcase).unwrap_or_else(|| src.display().to_string());
        let new_hash = hash_file(src)?;
        let current_hash = if dest.exists() {
            Some(hash_file(&dest)?)
        } else {
            None
        };

        if let (Some(current), Some(locked)) = (&current_hash, old_lock.files.get(dest_rel)) {
            if current != &locked.sha256 {
                tracing::debug!("skipping {dest_rel}: locally modified");
                outcome.managed.insert(
                    dest_rel.clone(),
                    LockEntry {
                        sha256: current.clone(),
                        source,
                    },
                );
                outcome.actions.push(SyncAction::Skipped {
                    path: dest_rel.clone(),
                });
                continue;
            }
        }

        let action = if current_hash.as_deref() == Some(new_hash.as_str()) {
            tracing::debug!("unchanged: {dest_rel}");
            SyncAction::Unchanged {
                path: dest_rel.clone(),
            }
        } else if dry_run {
            SyncAction::WouldSync {
                path: dest_rel.clone(),
            }
        } else {
            fsutil::atomic_copy(src, &dest)?;
            tracing::info!("synced {dest_rel}");
            SyncAction::Synced {
                path: dest_rel.clone(),
            }
        };

        outcome.managed.insert(
            dest_rel.clone(),
            LockEntry {
                sha256: new_hash,
                source,
            },
        );
        outcome.actions.push(action);
    }

    Ok(outcome)
}

/// Delete previously managed destinations that are absent from `managed`,
/// pruning directories they leave empty (never `target` itself).
pub fn cleanup_removed(
    old_lock: &LockFile,
    managed: &ManagedFiles,
    target: &Path,
    dry_run: bool,
) -> Result<Vec<SyncAction>, SyncError> {
    let mut actions = Vec::new();
    for dest_rel in old_lock.files.keys() {
        if managed.contains_key(dest_rel) {
            continue;
        }
        if !is_contained(dest_rel) {
            tracing::warn!("ignoring lock entry outside the target: {dest_rel}");
            continue;
        }

        let path = target.join(dest_rel);
        let present = std::fs::symlink_metadata(&path).is_ok();
        if dry_run {
            if present {
                actions.push(SyncAction::WouldRemove {
                    path: dest_rel.clone(),
                });
            }
            continue;
        }

        if present {
            std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
            tracing::info!("removed {dest_rel}");
            actions.push(SyncAction::Removed {
                path: dest_rel.clone(),
            });
        }
        fsutil::prune_empty_parents(&path, target);
    }
    Ok(actions)
}

/// Lock keys are relative paths made of plain components only.
fn is_contained(dest_rel: &str) -> bool {
    let path = Path::new(dest_rel);
    !dest_rel.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}
