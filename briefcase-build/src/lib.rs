//! # briefcase-build
//!
//! Producer side of a briefcase: expands `{{include <file>}}` directives in
//! `config-src/` and writes the result to `config/`.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use briefcase_build::build;
//! use briefcase_core::GitCli;
//!
//! let report = build(Path::new("/code/team-briefcase"), &GitCli::new())?;
//! std::process::exit(report.exit_code());
//! # Ok::<(), briefcase_build::BuildError>(())
//! ```

pub mod engine;
pub mod error;
pub mod include;
pub mod scaffold;

pub use engine::{build, BuildEntry, BuildReport};
pub use error::BuildError;
pub use include::resolve_includes;
pub use scaffold::{init, InitEntry};
