//! Fixed names shared by every briefcase and every target repository.
//!
//! # Briefcase layout
//!
//! ```text
//! <briefcase>/
//!   config-src/            templated sources (build input)
//!     _includes/           fragments, never copied to config/
//!     _shared/             applies to every target
//!     <project>/           applies to the target named <project>
//!   config/                generated (build output, sync input)
//! ```
//!
//! # Target layout
//!
//! ```text
//! <target>/
//!   .briefcase.lock            content-hash ledger
//!   .gitignore                 managed section lists synced files
//!   .briefcase-post-sync.sh    optional hook
//! ```
//!
//! These names are an interoperability contract with existing briefcases and
//! are not configurable.

use std::path::{Path, PathBuf};

pub const CONFIG_SRC: &str = "config-src";
pub const CONFIG_OUT: &str = "config";
pub const INCLUDES_DIR: &str = "_includes";
pub const DEFAULT_SHARED_FOLDER: &str = "_shared";
pub const DEFAULT_BRIEFCASE_DIR_NAME: &str = "team-briefcase";

pub const LOCK_FILE: &str = ".briefcase.lock";
pub const POST_SYNC_HOOK: &str = ".briefcase-post-sync.sh";
pub const GITIGNORE: &str = ".gitignore";

pub const MARKER_BEGIN: &str = "# BEGIN briefcase-managed (do not edit this section)";
pub const MARKER_END: &str = "# END briefcase-managed";

/// Environment variable that overrides every other briefcase location.
pub const BRIEFCASE_PATH_ENV: &str = "BRIEFCASE_PATH";

pub fn source_root(briefcase: &Path) -> PathBuf {
    briefcase.join(CONFIG_SRC)
}

pub fn output_root(briefcase: &Path) -> PathBuf {
    briefcase.join(CONFIG_OUT)
}

pub fn includes_dir(briefcase: &Path) -> PathBuf {
    source_root(briefcase).join(INCLUDES_DIR)
}

/// `<briefcase>/config/<layer>`: a shared or project layer.
pub fn layer_root(briefcase: &Path, layer: &str) -> PathBuf {
    output_root(briefcase).join(layer)
}

pub fn lock_path(target: &Path) -> PathBuf {
    target.join(LOCK_FILE)
}

pub fn gitignore_path(target: &Path) -> PathBuf {
    target.join(GITIGNORE)
}

pub fn hook_path(target: &Path) -> PathBuf {
    target.join(POST_SYNC_HOOK)
}

/// `<target>/../team-briefcase`, or `<target>/team-briefcase` when the target
/// has no parent.
pub fn default_briefcase_dir(target: &Path) -> PathBuf {
    target
        .parent()
        .unwrap_or(target)
        .join(DEFAULT_BRIEFCASE_DIR_NAME)
}
