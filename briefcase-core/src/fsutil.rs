//! Filesystem helpers shared by the build and sync pipelines.
//!
//! Writes use an atomic `<path>.briefcase.tmp` + rename protocol so a killed
//! process never leaves a half-written destination behind.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{io_err, FsError};

const TMP_SUFFIX: &str = "briefcase.tmp";

/// Every regular file under `root`, sorted by path.
///
/// Symlinks to files are reported (their content is read through the link);
/// symlinked directories are not descended into. A missing `root` yields an
/// empty list.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, FsError> {
    let mut out = Vec::new();
    if root.is_dir() {
        walk(root, &mut out)?;
    }
    out.sort();
    Ok(out)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), FsError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            walk(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        } else if file_type.is_symlink() {
            // Dangling links are skipped.
            if std::fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
                out.push(path);
            }
        }
    }
    Ok(())
}

/// `path` relative to `root`, `/`-separated. `None` if `path` is not below
/// `root`.
pub fn relative_key(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Read `path`, returning `None` when it does not exist.
pub fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, FsError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.{TMP_SUFFIX}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<(), FsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    Ok(())
}

fn rename_into_place(tmp: &Path, path: &Path) -> Result<(), FsError> {
    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

/// Write `content` to `path`, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), FsError> {
    ensure_parent(path)?;
    let tmp = tmp_path(path);
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    rename_into_place(&tmp, path)
}

/// Copy `src` to `dest` as a regular file, creating parent directories.
///
/// Symlinks at `src` are followed; permissions are carried over.
pub fn atomic_copy(src: &Path, dest: &Path) -> Result<(), FsError> {
    ensure_parent(dest)?;
    let tmp = tmp_path(dest);
    std::fs::copy(src, &tmp).map_err(|e| io_err(src, e))?;
    rename_into_place(&tmp, dest)
}

/// Remove directories left empty above `file`, walking upward and stopping at
/// the first non-empty directory or at `stop_at` (which is never removed).
pub fn prune_empty_parents(file: &Path, stop_at: &Path) {
    let mut current = file.parent();
    while let Some(dir) = current {
        if dir == stop_at || !dir.starts_with(stop_at) {
            break;
        }
        if std::fs::remove_dir(dir).is_err() {
            break;
        }
        tracing::debug!("pruned empty directory {}", dir.display());
        current = dir.parent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn collect_files_is_sorted_and_recursive() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("b/nested")).unwrap();
        fs::write(tmp.path().join("b/nested/z.md"), "z").unwrap();
        fs::write(tmp.path().join("a.md"), "a").unwrap();
        fs::write(tmp.path().join("b/c.md"), "c").unwrap();

        let files = collect_files(tmp.path()).unwrap();
        let keys: Vec<_> = files
            .iter()
            .map(|p| relative_key(p, tmp.path()).unwrap())
            .collect();
        assert_eq!(keys, vec!["a.md", "b/c.md", "b/nested/z.md"]);
    }

    #[test]
    fn collect_files_on_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let files = collect_files(&tmp.path().join("nope")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn collect_files_follows_file_symlinks() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("real.md"), "real").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real.md"), tmp.path().join("link.md"))
            .unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone.md"), tmp.path().join("dangling.md"))
            .unwrap();

        let files = collect_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 2, "dangling link must be skipped: {files:?}");
    }

    #[test]
    fn relative_key_uses_forward_slashes() {
        let root = Path::new("/b/config/_shared");
        let path = root.join(".claude").join("commands").join("x.md");
        assert_eq!(
            relative_key(&path, root).as_deref(),
            Some(".claude/commands/x.md")
        );
        assert_eq!(relative_key(Path::new("/elsewhere/x.md"), root), None);
    }

    #[test]
    fn atomic_write_creates_parents_and_leaves_no_tmp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deep").join("dir").join("file.md");
        atomic_write(&path, b"content").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"content");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    #[cfg(unix)]
    fn atomic_copy_materialises_symlinks_as_files() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("real.md");
        let link = tmp.path().join("link.md");
        fs::write(&real, "shared text").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let dest = tmp.path().join("out").join("copy.md");
        atomic_copy(&link, &dest).unwrap();
        let meta = fs::symlink_metadata(&dest).unwrap();
        assert!(meta.file_type().is_file());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "shared text");
    }

    #[test]
    fn prune_stops_at_root_and_at_non_empty_dirs() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("a/keep.md"), "k").unwrap();
        let file = root.join("a/b/c/gone.md");

        prune_empty_parents(&file, root);
        assert!(!root.join("a/b").exists(), "empty chain should be pruned");
        assert!(root.join("a").exists(), "non-empty dir must survive");

        let top = root.join("top.md");
        prune_empty_parents(&top, root);
        assert!(root.exists(), "stop_at is never removed");
    }

    #[test]
    fn read_if_exists_distinguishes_absence() {
        let tmp = TempDir::new().unwrap();
        assert!(read_if_exists(&tmp.path().join("none")).unwrap().is_none());
        fs::write(tmp.path().join("some"), "x").unwrap();
        assert_eq!(
            read_if_exists(&tmp.path().join("some")).unwrap().as_deref(),
            Some(&b"x"[..])
        );
    }
}
