//! # sdval-cli: Structured-Data Validation Command-Line Interface
//!
//! Argument parsing lives in `main.rs`; the handlers here build a
//! [`Validator`](sdval_engine::Validator) from the merged configuration and
//! report its issues.
//!
//! ## Subcommands
//!
//! - `validate`: validate one extracted document, print the issues as JSON.
//! - `types`: list the type names with registered rule-sets.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                                          |
//! |------|------------------------------------------------------------------|
//! | `0`  | no failing issues                                                |
//! | `1`  | operational failure (unreadable file, invalid JSON or YAML)      |
//! | `2`  | failing issues: any ERROR, or any WARNING with `fail_on_warnings` |

pub mod config;
pub mod validate;

use std::path::{Path, PathBuf};

/// Resolve a path relative to the configuration file's directory when it
/// exists there, else as given.
pub fn resolve_path(path: &Path, base_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match base_dir.map(|dir| dir.join(path)) {
        Some(relative) if relative.exists() => relative,
        _ => path.to_path_buf(),
    }
}
