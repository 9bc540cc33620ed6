//! Lock store: SHA-256 ledger of synced files.
//!
//! Persists a [`LockFile`] JSON document at `<target>/.briefcase.lock`:
//!
//! ```json
//! {
//!   "files": {
//!     "CLAUDE.md": {
//!       "sha256": "…",
//!       "source": "config/_shared/CLAUDE.md"
//!     }
//!   },
//!   "source_commit": "…"
//! }
//! ```
//!
//! Keys are written in sorted order with a trailing newline, so identical
//! content always serialises to identical bytes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use briefcase_core::{error::io_err, fsutil, layout};

use crate::error::SyncError;

/// Recorded when the briefcase commit cannot be determined.
pub const UNKNOWN_COMMIT: &str = "unknown";

/// One managed destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    /// Hex SHA-256 of the destination content as last synced (or as last seen
    /// when a local edit was kept).
    #[serde(default)]
    pub sha256: String,
    /// Briefcase-relative path of the file it came from.
    #[serde(default)]
    pub source: String,
}

/// Destination-relative path → entry.
pub type ManagedFiles = BTreeMap<String, LockEntry>;

/// On-disk lock payload. Field order is alphabetical so the serialised
/// object has sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
    #[serde(default)]
    pub files: ManagedFiles,
    /// Advisory: briefcase commit at sync time, `unknown` if unavailable.
    #[serde(default)]
    pub source_commit: String,
}

/// Load the lock for `target`.
///
/// Returns an empty lock if the file does not yet exist.
pub fn load_at(target: &Path) -> Result<LockFile, SyncError> {
    let path = layout::lock_path(target);
    let Some(bytes) = fsutil::read_if_exists(&path)? else {
        return Ok(LockFile::default());
    };
    serde_json::from_slice(&bytes).map_err(|source| SyncError::LockParse { path, source })
}

/// Render `lock` exactly as it is stored on disk.
pub fn to_bytes(lock: &LockFile) -> Result<Vec<u8>, SyncError> {
    let mut json = serde_json::to_string_pretty(lock)?;
    json.push('\n');
    Ok(json.into_bytes())
}

/// Save the lock for `target` atomically.
pub fn save_at(target: &Path, lock: &LockFile) -> Result<(), SyncError> {
    let path = layout::lock_path(target);
    fsutil::atomic_write(&path, &to_bytes(lock)?)?;
    Ok(())
}

/// Hex SHA-256 of the file's bytes (symlinks followed).
pub fn hash_file(path: &Path) -> Result<String, SyncError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> LockFile {
        let mut files = ManagedFiles::new();
        files.insert(
            "CLAUDE.md".to_string(),
            LockEntry {
                sha256: "deadbeef".to_string(),
                source: "config/_shared/CLAUDE.md".to_string(),
            },
        );
        files.insert(
            ".claude/settings.json".to_string(),
            LockEntry {
                sha256: "cafebabe".to_string(),
                source: "config/api/.claude/settings.json".to_string(),
            },
        );
        LockFile {
            files,
            source_commit: "abc123".to_string(),
        }
    }

    #[test]
    fn empty_lock_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let lock = load_at(tmp.path()).unwrap();
        assert!(lock.files.is_empty());
        assert_eq!(lock.source_commit, "");
    }

    #[test]
    fn roundtrip_save_load() {
        let tmp = TempDir::new().unwrap();
        save_at(tmp.path(), &sample()).unwrap();
        assert_eq!(load_at(tmp.path()).unwrap(), sample());
    }

    #[test]
    fn serialised_form_is_sorted_pretty_and_newline_terminated() {
        let text = String::from_utf8(to_bytes(&sample()).unwrap()).unwrap();
        let expected = r#"{
  "files": {
    ".claude/settings.json": {
      "sha256": "cafebabe",
      "source": "config/api/.claude/settings.json"
    },
    "CLAUDE.md": {
      "sha256": "deadbeef",
      "source": "config/_shared/CLAUDE.md"
    }
  },
  "source_commit": "abc123"
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn repeated_saves_are_byte_identical() {
        let tmp = TempDir::new().unwrap();
        save_at(tmp.path(), &sample()).unwrap();
        let first = fs::read(layout::lock_path(tmp.path())).unwrap();
        let reloaded = load_at(tmp.path()).unwrap();
        save_at(tmp.path(), &reloaded).unwrap();
        let second = fs::read(layout::lock_path(tmp.path())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn entries_missing_fields_load_with_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            layout::lock_path(tmp.path()),
            r#"{"files":{"CLAUDE.md":{"source":"config/_shared/CLAUDE.md"}}}"#,
        )
        .unwrap();
        let lock = load_at(tmp.path()).unwrap();
        assert_eq!(lock.files["CLAUDE.md"].sha256, "");
        assert_eq!(lock.source_commit, "");
    }

    #[test]
    fn corrupt_lock_reports_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(layout::lock_path(tmp.path()), "{ not json").unwrap();
        let err = load_at(tmp.path()).unwrap_err();
        assert!(matches!(err, SyncError::LockParse { .. }));
        assert!(err.to_string().contains(".briefcase.lock"));
    }

    #[test]
    fn hash_is_hex_sha256_of_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty");
        fs::write(&path, "").unwrap();
        assert_eq!(
            hash_file(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
