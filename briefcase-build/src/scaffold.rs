//! `briefcase init`: lay out a fresh briefcase.
//!
//! Existing files are never overwritten, so re-running only fills gaps.

use std::path::Path;

use briefcase_core::{
    error::io_err,
    fsutil,
    layout::{CONFIG_OUT, CONFIG_SRC, DEFAULT_BRIEFCASE_DIR_NAME, DEFAULT_SHARED_FOLDER, INCLUDES_DIR},
};

use crate::error::BuildError;

const BRIEFCASE_MD: &str = include_str!("templates/BRIEFCASE.md");
const INCLUDES_README: &str = include_str!("templates/includes-README.md");
const DOTFILES_README: &str = include_str!("templates/dotfiles-README.md");

/// One scaffolded path. Directories carry a trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitEntry {
    Created { path: String },
    Skipped { path: String },
}

fn scaffold_files(dir_name: &str) -> Vec<(String, String)> {
    let version = format!("v{}", env!("CARGO_PKG_VERSION"));
    let mut files = vec![
        (
            "BRIEFCASE.md".to_string(),
            BRIEFCASE_MD
                .replace("$VERSION", &version)
                .replace("$DIR_NAME", dir_name),
        ),
        (
            format!("{CONFIG_SRC}/{INCLUDES_DIR}/README.md"),
            INCLUDES_README.to_string(),
        ),
        ("dotfiles/README.md".to_string(), DOTFILES_README.to_string()),
    ];
    files.sort();
    files
}

/// Scaffold a briefcase at `dir`.
pub fn init(dir: &Path) -> Result<Vec<InitEntry>, BuildError> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_BRIEFCASE_DIR_NAME.to_string());
    let mut entries = Vec::new();

    for rel in [
        CONFIG_OUT.to_string(),
        format!("{CONFIG_SRC}/{DEFAULT_SHARED_FOLDER}"),
    ] {
        let path = dir.join(&rel);
        if !path.is_dir() {
            std::fs::create_dir_all(&path).map_err(|e| io_err(&path, e))?;
            entries.push(InitEntry::Created {
                path: format!("{rel}/"),
            });
        }
    }

    for (rel, content) in scaffold_files(&dir_name) {
        let dest = dir.join(&rel);
        if dest.exists() {
            entries.push(InitEntry::Skipped { path: rel });
            continue;
        }
        fsutil::atomic_write(&dest, content.as_bytes())?;
        entries.push(InitEntry::Created { path: rel });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fresh_init_creates_full_structure() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("team-briefcase");
        fs::create_dir_all(&root).unwrap();

        let entries = init(&root).unwrap();
        assert!(entries.iter().all(|e| matches!(e, InitEntry::Created { .. })));
        assert!(root.join("config").is_dir());
        assert!(root.join("config-src/_shared").is_dir());
        assert!(root.join("config-src/_includes/README.md").is_file());
        assert!(root.join("dotfiles/README.md").is_file());

        let briefcase_md = fs::read_to_string(root.join("BRIEFCASE.md")).unwrap();
        assert!(briefcase_md.contains("../team-briefcase"));
        assert!(!briefcase_md.contains("$VERSION"));
    }

    #[test]
    fn rerun_skips_existing_files() {
        let tmp = TempDir::new().unwrap();
        init(tmp.path()).unwrap();
        fs::write(tmp.path().join("BRIEFCASE.md"), "customised").unwrap();

        let entries = init(tmp.path()).unwrap();
        assert!(entries.iter().all(|e| matches!(e, InitEntry::Skipped { .. })));
        assert_eq!(
            fs::read_to_string(tmp.path().join("BRIEFCASE.md")).unwrap(),
            "customised"
        );
    }
}
