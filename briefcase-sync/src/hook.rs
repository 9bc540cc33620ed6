//! Optional post-sync hook: `<target>/.briefcase-post-sync.sh`.
//!
//! Run with `bash` from the target root when present and executable. Its exit
//! status is reported but never fails the sync.

use std::path::Path;
use std::process::{Command, Stdio};

use briefcase_core::layout::{self, POST_SYNC_HOOK};

/// What happened to the post-sync hook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HookOutcome {
    /// Not run: absent, not executable, or the sync had nothing to manage.
    #[default]
    NotRun,
    /// Ran to completion; `success` mirrors its exit status.
    Ran { success: bool },
    /// Could not be started.
    Failed { reason: String },
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Run the hook in `target` if there is one.
pub fn run_post_sync_hook(target: &Path) -> HookOutcome {
    let hook = layout::hook_path(target);
    if !is_executable(&hook) {
        return HookOutcome::NotRun;
    }

    tracing::info!("running {POST_SYNC_HOOK}");
    match Command::new("bash")
        .arg(&hook)
        .current_dir(target)
        .stdin(Stdio::null())
        .status()
    {
        Ok(status) => {
            if !status.success() {
                tracing::debug!("{POST_SYNC_HOOK} exited with {status}");
            }
            HookOutcome::Ran {
                success: status.success(),
            }
        }
        Err(err) => {
            tracing::warn!("could not run {POST_SYNC_HOOK}: {err}");
            HookOutcome::Failed {
                reason: err.to_string(),
            }
        }
    }
}
