//! Briefcase core library: layout constants, filesystem helpers, version
//! control probing, errors.
//!
//! - [`layout`]: fixed directory/file names and path helpers
//! - [`fsutil`]: sorted walks, atomic writes, empty-directory pruning
//! - [`vcs`]: [`VersionControl`] capability and the [`GitCli`] implementation
//! - [`error`]: [`FsError`], [`VcsError`]

pub mod error;
pub mod fsutil;
pub mod layout;
pub mod vcs;

pub use error::{FsError, VcsError};
pub use vcs::{GitCli, RemoteLag, VersionControl};
