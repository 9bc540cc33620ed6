//! # briefcase-sync
//!
//! Copies a briefcase's `config/` layers into a target project while
//! protecting local edits.
//!
//! Call [`run`] with a resolved [`SyncConfig`] for a full sync, or
//! [`status::check`] for a read-only view of the managed files.

pub mod collect;
pub mod config;
pub mod engine;
pub mod error;
pub mod hook;
pub mod ignore;
pub mod lock;
pub mod pipeline;
pub mod staleness;
pub mod status;

pub use collect::{collect_files, SyncMapping};
pub use config::{SyncConfig, SyncOverrides};
pub use engine::{cleanup_removed, sync_files, SyncAction, SyncOutcome};
pub use error::SyncError;
pub use hook::HookOutcome;
pub use lock::{LockEntry, LockFile};
pub use pipeline::{run, run_with_progress, SyncEvent, SyncReport};
pub use status::{FileStatus, StatusReport};
