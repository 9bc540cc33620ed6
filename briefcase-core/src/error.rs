//! Error types for briefcase-core.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Filesystem failure with the offending path attached.
#[derive(Debug, Error)]
#[error("I/O error at {path}: {source}")]
pub struct FsError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Convenience constructor for [`FsError`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> FsError {
    FsError {
        path: path.into(),
        source,
    }
}

/// Failures from a version-control probe.
///
/// Callers treat every variant as "information unavailable"; none of them is
/// fatal to a build or a sync.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The directory is not inside a working tree.
    #[error("{path} is not under version control")]
    NotARepository { path: PathBuf },

    /// The `git` executable could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran but exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The command did not finish within its time budget and was killed.
    #[error("`{command}` timed out after {}s", .after.as_secs())]
    Timeout { command: String, after: Duration },

    /// The command printed something we could not interpret.
    #[error("unexpected output from `{command}`: {output}")]
    Parse { command: String, output: String },
}
