//! Advisory check: is the local briefcase checkout behind its remote?
//!
//! Never fails a sync. Any version-control problem (not a repository, no
//! network, fetch timeout, no remote default branch) yields `None`.

use std::path::Path;

use briefcase_core::{RemoteLag, VersionControl};

/// Lag of the briefcase checkout, or `None` if current or undeterminable.
pub fn check_briefcase(vcs: &dyn VersionControl, briefcase: &Path) -> Option<RemoteLag> {
    match vcs.remote_lag(briefcase) {
        Ok(lag) => lag.filter(|l| l.behind > 0),
        Err(err) => {
            tracing::debug!("staleness check skipped: {err}");
            None
        }
    }
}

/// User-facing warning for `lag`.
pub fn warning_message(lag: &RemoteLag, briefcase: &Path) -> String {
    format!(
        "briefcase repo is {} commit(s) behind {}. Run `git -C {} pull` to get the latest team config.",
        lag.behind,
        lag.branch,
        briefcase.display()
    )
}
