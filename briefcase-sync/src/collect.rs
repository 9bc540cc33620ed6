//! Layered collector: merge the shared and project layers of `config/`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use briefcase_core::{fsutil, layout};

use crate::error::SyncError;

/// Destination-relative path → absolute source file.
pub type SyncMapping = BTreeMap<String, PathBuf>;

/// Files to sync into the target named `project`.
///
/// `config/<shared>/` is walked first, then `config/<project>/`; a project
/// file replaces the shared file at the same relative path. Missing layers
/// contribute nothing.
pub fn collect_files(
    briefcase: &Path,
    project: &str,
    shared_folder: &str,
) -> Result<SyncMapping, SyncError> {
    let mut files = SyncMapping::new();
    for layer in [shared_folder, project] {
        if layer.is_empty() {
            continue;
        }
        let root = layout::layer_root(briefcase, layer);
        for src in fsutil::collect_files(&root)? {
            if let Some(key) = fsutil::relative_key(&src, &root) {
                files.insert(key, src);
            }
        }
    }
    Ok(files)
}
