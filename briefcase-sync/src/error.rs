//! Error types for briefcase-sync.

use std::path::PathBuf;

use thiserror::Error;

use briefcase_core::FsError;

/// All errors that abort a sync.
///
/// Locally modified files, a missing briefcase and version-control hiccups
/// are not errors; they show up in the [`crate::SyncReport`].
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fs(#[from] FsError),

    /// The lock file exists but is not valid JSON of the expected shape.
    #[error("failed to parse lock file at {path}: {source}")]
    LockParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file that must be edited in place is not valid UTF-8.
    #[error("{path} is not valid UTF-8; refusing to rewrite it")]
    NotUtf8 { path: PathBuf },

    /// JSON serialization error (lock file, status output).
    #[error("lock file JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
