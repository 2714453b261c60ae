// src/commands/common.rs

use std::path::Path;

/// Read an input file, reporting failures on stderr.
pub fn read_input(path: &Path, what: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            eprintln!("error: could not read {what} '{}': {e}", path.display());
            None
        }
    }
}
