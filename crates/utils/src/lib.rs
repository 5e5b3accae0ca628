// utils crate

pub mod sanitize;

pub use sanitize::{sanitize_for_display, sanitize_for_parsing};

use std::path::Path;

/// Only files whose name ends in `.json` are validated
pub fn is_json_file_name(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".json")
}

/// A directory entry worth validating: a regular file with a `.json` name
pub fn is_json_file(path: &Path) -> bool {
    path.is_file() && is_json_file_name(path)
}
