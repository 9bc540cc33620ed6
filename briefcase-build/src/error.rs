//! Error types for briefcase-build.

use thiserror::Error;

use briefcase_core::FsError;

/// All errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A fragment (directly or transitively) includes itself. `chain` runs
    /// from the outermost fragment to the repeated name.
    #[error("circular include detected: {}", .chain.join(" → "))]
    Cycle { chain: Vec<String> },

    /// A directive names a fragment that is not a file in `_includes/`.
    #[error("include file not found: {name}")]
    NotFound { name: String },

    #[error(transparent)]
    Fs(#[from] FsError),
}
