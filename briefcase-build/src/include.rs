//! Include resolver.
//!
//! A directive is a line holding nothing but `{{include <fragment>}}`
//! (surrounding blanks allowed). The directive text is replaced by the fully
//! resolved fragment; the line terminator that followed it is kept.
//! Fragments are looked up by relative path inside the includes directory and
//! may themselves contain directives.

use std::path::Path;

use briefcase_core::error::io_err;

use crate::error::BuildError;

const OPEN: &str = "{{include";
const CLOSE: &str = "}}";

/// Expand every include directive in `content`, depth-first.
///
/// Fails with [`BuildError::Cycle`] when a fragment reappears in its own
/// inclusion chain and [`BuildError::NotFound`] when a fragment is missing.
pub fn resolve_includes(content: &str, includes_dir: &Path) -> Result<String, BuildError> {
    let mut chain = Vec::new();
    resolve_with_chain(content, includes_dir, &mut chain)
}

fn resolve_with_chain(
    content: &str,
    includes_dir: &Path,
    chain: &mut Vec<String>,
) -> Result<String, BuildError> {
    let mut out = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        let Some(name) = directive_target(body) else {
            out.push_str(line);
            continue;
        };

        if chain.iter().any(|seen| seen == name) {
            let mut cycle = chain.clone();
            cycle.push(name.to_string());
            return Err(BuildError::Cycle { chain: cycle });
        }

        let fragment = includes_dir.join(name);
        if !fragment.is_file() {
            return Err(BuildError::NotFound {
                name: name.to_string(),
            });
        }
        let text = std::fs::read_to_string(&fragment).map_err(|e| io_err(&fragment, e))?;

        chain.push(name.to_string());
        let resolved = resolve_with_chain(&text, includes_dir, chain)?;
        chain.pop();

        out.push_str(&resolved);
        out.push_str(terminator);
    }
    Ok(out)
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// The fragment name if `line` is a directive.
fn directive_target(line: &str) -> Option<&str> {
    let inner = line.trim().strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
    if !inner.starts_with([' ', '\t']) {
        return None;
    }
    let name = inner.trim();
    (!name.is_empty()).then_some(name)
}
