// src/commands/decode.rs

use std::path::Path;
use std::process::ExitCode;

use unitsynth_runtime::{SuitePrinter, decode_run};

use super::common::read_input;

/// Print the assertions decoded from a file of capture lines.
pub fn decode_file(path: &Path) -> ExitCode {
    let Some(text) = read_input(path, "captures") else {
        return ExitCode::FAILURE;
    };
    let stmts = decode_run(text.lines(), &SuitePrinter::default());
    tracing::debug!(path = %path.display(), stmts = stmts.len(), "captures decoded");
    for stmt in &stmts {
        println!("{stmt}");
    }
    ExitCode::SUCCESS
}
