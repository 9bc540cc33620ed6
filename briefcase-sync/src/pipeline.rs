//! Sync pipeline entrypoint: one target, one briefcase.

use std::path::PathBuf;

use briefcase_core::{RemoteLag, VersionControl};

use crate::collect::collect_files;
use crate::config::SyncConfig;
use crate::engine::{cleanup_removed, sync_files, SyncAction};
use crate::error::SyncError;
use crate::hook::{run_post_sync_hook, HookOutcome};
use crate::lock::{self, LockFile, ManagedFiles, UNKNOWN_COMMIT};
use crate::{ignore, staleness};

/// Everything a sync run did (or, with `dry_run`, would do).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub briefcase_dir: PathBuf,
    pub project: String,
    /// The briefcase directory does not exist; nothing was touched.
    pub briefcase_missing: bool,
    /// Neither layer offered any file; previously managed files were removed.
    pub mapping_empty: bool,
    pub behind: Option<RemoteLag>,
    pub source_commit: String,
    pub actions: Vec<SyncAction>,
    pub hook: HookOutcome,
    pub dry_run: bool,
}

impl SyncReport {
    fn new(config: &SyncConfig) -> Self {
        Self {
            briefcase_dir: config.briefcase_dir.clone(),
            project: config.project.clone(),
            briefcase_missing: false,
            mapping_empty: false,
            behind: None,
            source_commit: UNKNOWN_COMMIT.to_string(),
            actions: Vec::new(),
            hook: HookOutcome::NotRun,
            dry_run: config.dry_run,
        }
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().filter_map(|a| match a {
            SyncAction::Skipped { path } => Some(path.as_str()),
            _ => None,
        })
    }
}

/// Progress of a running sync, delivered before the post-sync hook starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent<'a> {
    Behind(&'a RemoteLag),
    MappingEmpty,
    Action(&'a SyncAction),
}

/// Sync `config.target_dir` from `config.briefcase_dir`.
///
/// Order: staleness advisory, collect, copy, cleanup, ignore section, lock,
/// post-sync hook. A missing briefcase is a warning, not an error.
pub fn run(config: &SyncConfig, vcs: &dyn VersionControl) -> Result<SyncReport, SyncError> {
    run_with_progress(config, vcs, |_| {})
}

/// [`run`], reporting each [`SyncEvent`] to `on_event` as it happens.
pub fn run_with_progress<F>(
    config: &SyncConfig,
    vcs: &dyn VersionControl,
    mut on_event: F,
) -> Result<SyncReport, SyncError>
where
    F: FnMut(SyncEvent<'_>),
{
    let mut report = SyncReport::new(config);
    let target = config.target_dir.as_path();
    let briefcase = config.briefcase_dir.as_path();

    if !briefcase.is_dir() {
        tracing::debug!("no briefcase at {}", briefcase.display());
        report.briefcase_missing = true;
        return Ok(report);
    }

    report.behind = staleness::check_briefcase(vcs, briefcase);
    if let Some(lag) = &report.behind {
        on_event(SyncEvent::Behind(lag));
    }

    let old_lock = lock::load_at(target)?;
    report.source_commit = match vcs.head_commit(briefcase) {
        Ok(commit) => commit,
        Err(err) => {
            tracing::debug!("briefcase commit unavailable: {err}");
            UNKNOWN_COMMIT.to_string()
        }
    };

    let mapping = collect_files(briefcase, &config.project, &config.shared_folder)?;
    report.mapping_empty = mapping.is_empty();

    let managed = if mapping.is_empty() {
        on_event(SyncEvent::MappingEmpty);
        ManagedFiles::new()
    } else {
        let outcome = sync_files(&mapping, &old_lock, briefcase, target, config.dry_run)?;
        outcome.actions.iter().for_each(|a| on_event(SyncEvent::Action(a)));
        report.actions = outcome.actions;
        outcome.managed
    };
    let removed = cleanup_removed(&old_lock, &managed, target, config.dry_run)?;
    removed.iter().for_each(|a| on_event(SyncEvent::Action(a)));
    report.actions.extend(removed);

    if config.dry_run {
        return Ok(report);
    }

    ignore::update_at(target, managed.keys().map(String::as_str))?;
    lock::save_at(
        target,
        &LockFile {
            files: managed,
            source_commit: report.source_commit.clone(),
        },
    )?;

    if !report.mapping_empty {
        report.hook = run_post_sync_hook(target);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncOverrides;
    use briefcase_core::VcsError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct NoRepo;

    impl VersionControl for NoRepo {
        fn head_commit(&self, repo: &Path) -> Result<String, VcsError> {
            Err(VcsError::NotARepository {
                path: repo.to_path_buf(),
            })
        }

        fn remote_lag(&self, repo: &Path) -> Result<Option<RemoteLag>, VcsError> {
            Err(VcsError::NotARepository {
                path: repo.to_path_buf(),
            })
        }

        fn unstaged_paths(&self, _repo: &Path, _pathspec: &str) -> Result<Vec<String>, VcsError> {
            Ok(Vec::new())
        }
    }

    fn setup() -> (TempDir, SyncConfig) {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("payments");
        fs::create_dir_all(&target).unwrap();
        let config = SyncConfig::resolve_with_env(&target, SyncOverrides::default(), None);
        (tmp, config)
    }

    #[test]
    fn missing_briefcase_touches_nothing() {
        let (_tmp, config) = setup();
        let report = run(&config, &NoRepo).unwrap();
        assert!(report.briefcase_missing);
        assert!(!config.target_dir.join(".briefcase.lock").exists());
        assert!(!config.target_dir.join(".gitignore").exists());
    }

    #[test]
    fn unknown_commit_when_not_a_repository() {
        let (_tmp, config) = setup();
        let shared = config.briefcase_dir.join("config/_shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("CLAUDE.md"), "x").unwrap();

        let report = run(&config, &NoRepo).unwrap();
        assert_eq!(report.source_commit, "unknown");
        assert_eq!(report.behind, None);
        let lock = lock::load_at(&config.target_dir).unwrap();
        assert_eq!(lock.source_commit, "unknown");
    }

    #[test]
    fn dry_run_writes_no_bookkeeping() {
        let (_tmp, config) = setup();
        let shared = config.briefcase_dir.join("config/_shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("CLAUDE.md"), "x").unwrap();

        let config = config.with_dry_run(true);
        let report = run(&config, &NoRepo).unwrap();
        assert!(report.dry_run);
        assert_eq!(
            report.actions,
            vec![SyncAction::WouldSync { path: "CLAUDE.md".into() }]
        );
        assert!(!config.target_dir.join("CLAUDE.md").exists());
        assert!(!config.target_dir.join(".briefcase.lock").exists());
        assert!(!config.target_dir.join(".gitignore").exists());
    }

    #[test]
    #[cfg(unix)]
    fn progress_is_reported_before_the_hook_runs() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, config) = setup();
        let shared = config.briefcase_dir.join("config/_shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("CLAUDE.md"), "x").unwrap();
        let hook = config.target_dir.join(".briefcase-post-sync.sh");
        fs::write(&hook, "touch hook-ran\n").unwrap();
        fs::set_permissions(&hook, fs::Permissions::from_mode(0o755)).unwrap();

        let marker = config.target_dir.join("hook-ran");
        let mut seen = Vec::new();
        let report = run_with_progress(&config, &NoRepo, |event| {
            assert!(!marker.exists(), "hook ran before progress was reported");
            if let SyncEvent::Action(action) = event {
                seen.push(action.clone());
            }
        })
        .unwrap();

        assert!(marker.exists());
        assert_eq!(seen, report.actions);
        assert_eq!(seen, vec![SyncAction::Synced { path: "CLAUDE.md".into() }]);
    }

    #[test]
    fn empty_mapping_is_reported() {
        let (_tmp, config) = setup();
        fs::create_dir_all(config.briefcase_dir.join("config/_shared")).unwrap();
        let mut events = Vec::new();
        run_with_progress(&config, &NoRepo, |event| {
            events.push(matches!(event, SyncEvent::MappingEmpty))
        })
        .unwrap();
        assert_eq!(events, vec![true]);
    }

    #[test]
    fn skipped_lists_locally_modified_paths() {
        let mut report = SyncReport::new(&setup().1);
        report.actions = vec![
            SyncAction::Synced { path: "a.md".into() },
            SyncAction::Skipped { path: "b.md".into() },
        ];
        assert_eq!(report.skipped().collect::<Vec<_>>(), vec!["b.md"]);
    }
}
