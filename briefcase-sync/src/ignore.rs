//! Managed section of the target's `.gitignore`.
//!
//! ```text
//! # BEGIN briefcase-managed (do not edit this section)
//! /.claude/settings.json
//! /CLAUDE.md
//! # END briefcase-managed
//! ```
//!
//! Lines outside the markers are preserved. Without markers the section is
//! appended, separated from earlier content by a blank line.

use std::path::Path;

use briefcase_core::{
    fsutil,
    layout::{self, MARKER_BEGIN, MARKER_END},
};

use crate::error::SyncError;

/// `existing` with its managed section replaced by `managed` (sorted).
pub fn render<'a, I>(existing: &str, managed: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut paths: Vec<&str> = managed.into_iter().collect();
    paths.sort_unstable();
    paths.dedup();

    let mut section = Vec::with_capacity(paths.len() + 2);
    section.push(MARKER_BEGIN.to_string());
    section.extend(paths.iter().map(|p| format!("/{p}")));
    section.push(MARKER_END.to_string());

    let mut lines: Vec<String> = existing.lines().map(str::to_string).collect();
    let begin = lines.iter().rposition(|l| l == MARKER_BEGIN);
    let end = lines.iter().rposition(|l| l == MARKER_END);

    match (begin, end) {
        (Some(b), Some(e)) if b < e => {
            lines.splice(b..=e, section);
        }
        _ => {
            if lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }
            lines.extend(section);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Rewrite `<target>/.gitignore` so its managed section lists `managed`.
///
/// The file is only touched when its content actually changes. A file that
/// is not valid UTF-8 is left alone and reported as an error.
pub fn update_at<'a, I>(target: &Path, managed: I) -> Result<(), SyncError>
where
    I: IntoIterator<Item = &'a str>,
{
    let path = layout::gitignore_path(target);
    let existing = match fsutil::read_if_exists(&path)? {
        Some(bytes) => String::from_utf8(bytes).map_err(|_| SyncError::NotUtf8 {
            path: path.clone(),
        })?,
        None => String::new(),
    };
    let updated = render(&existing, managed);
    if updated != existing {
        fsutil::atomic_write(&path, updated.as_bytes())?;
        tracing::debug!("updated {}", path.display());
    }
    Ok(())
}
