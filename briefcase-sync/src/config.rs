//! Sync configuration, resolved once at the command-line boundary.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use briefcase_core::layout::{self, BRIEFCASE_PATH_ENV, DEFAULT_SHARED_FOLDER};

/// Everything a sync (or status) run needs, as explicit values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub target_dir: PathBuf,
    pub briefcase_dir: PathBuf,
    /// Name of the project layer under `config/`.
    pub project: String,
    pub shared_folder: String,
    pub dry_run: bool,
}

/// Values supplied on the command line; `None` means "use the default".
#[derive(Debug, Clone, Default)]
pub struct SyncOverrides {
    pub briefcase: Option<PathBuf>,
    pub project: Option<String>,
    pub shared: Option<String>,
}

impl SyncConfig {
    /// Resolve against the process environment (`BRIEFCASE_PATH`).
    pub fn resolve(target_dir: &Path, overrides: SyncOverrides) -> Self {
        Self::resolve_with_env(target_dir, overrides, std::env::var_os(BRIEFCASE_PATH_ENV))
    }

    /// Briefcase precedence: non-empty `env` value, then `overrides.briefcase`,
    /// then the sibling `team-briefcase` directory. Relative paths are taken
    /// relative to `target_dir`.
    pub fn resolve_with_env(
        target_dir: &Path,
        overrides: SyncOverrides,
        env: Option<OsString>,
    ) -> Self {
        let briefcase_dir = env
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(overrides.briefcase)
            .map(|p| absolutize(target_dir, &p))
            .unwrap_or_else(|| layout::default_briefcase_dir(target_dir));

        let project = overrides.project.unwrap_or_else(|| {
            target_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

        Self {
            target_dir: target_dir.to_path_buf(),
            briefcase_dir,
            project,
            shared_folder: overrides
                .shared
                .unwrap_or_else(|| DEFAULT_SHARED_FOLDER.to_string()),
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined.canonicalize().unwrap_or(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn dirs() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let target = root.join("payments");
        fs::create_dir_all(&target).unwrap();
        (tmp, target)
    }

    #[test]
    fn defaults_to_sibling_briefcase_and_dir_name() {
        let (_tmp, target) = dirs();
        let cfg = SyncConfig::resolve_with_env(&target, SyncOverrides::default(), None);
        assert_eq!(
            cfg.briefcase_dir,
            target.parent().unwrap().join("team-briefcase")
        );
        assert_eq!(cfg.project, "payments");
        assert_eq!(cfg.shared_folder, "_shared");
        assert!(!cfg.dry_run);
    }

    #[test]
    fn env_beats_flag() {
        let (_tmp, target) = dirs();
        let overrides = SyncOverrides {
            briefcase: Some(PathBuf::from("/from/flag")),
            ..Default::default()
        };
        let cfg =
            SyncConfig::resolve_with_env(&target, overrides, Some(OsString::from("/from/env")));
        assert_eq!(cfg.briefcase_dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn empty_env_is_ignored() {
        let (_tmp, target) = dirs();
        let overrides = SyncOverrides {
            briefcase: Some(PathBuf::from("/from/flag")),
            ..Default::default()
        };
        let cfg = SyncConfig::resolve_with_env(&target, overrides, Some(OsString::new()));
        assert_eq!(cfg.briefcase_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn relative_briefcase_resolves_against_target() {
        let (_tmp, target) = dirs();
        let shared = target.parent().unwrap().join("shared-kit");
        fs::create_dir_all(&shared).unwrap();
        let overrides = SyncOverrides {
            briefcase: Some(PathBuf::from("../shared-kit")),
            ..Default::default()
        };
        let cfg = SyncConfig::resolve_with_env(&target, overrides, None);
        assert_eq!(cfg.briefcase_dir, shared);
    }

    #[test]
    fn project_and_shared_overrides() {
        let (_tmp, target) = dirs();
        let overrides = SyncOverrides {
            project: Some("billing".into()),
            shared: Some("common".into()),
            ..Default::default()
        };
        let cfg = SyncConfig::resolve_with_env(&target, overrides, None).with_dry_run(true);
        assert_eq!(cfg.project, "billing");
        assert_eq!(cfg.shared_folder, "common");
        assert!(cfg.dry_run);
    }
}
