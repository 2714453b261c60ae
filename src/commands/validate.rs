// src/commands/validate.rs

use std::path::Path;
use std::process::ExitCode;

use unitsynth_runtime::{SuitePrinter, validate_runs};

use super::common::read_input;

/// Decode two runs and accept their assertions only if they agree.
///
/// Prints `valid` followed by the assertions, or `invalid`. A `panics` line
/// follows the verdict when either run recorded a panic. Exits non-zero
/// when the runs disagree.
pub fn validate_files(first: &Path, second: &Path) -> ExitCode {
    let (Some(first_text), Some(second_text)) = (
        read_input(first, "first run"),
        read_input(second, "second run"),
    ) else {
        return ExitCode::FAILURE;
    };

    let info = validate_runs(
        first_text.lines(),
        second_text.lines(),
        &SuitePrinter::default(),
    );
    if !info.is_valid {
        println!("invalid");
        if info.panics {
            println!("panics");
        }
        eprintln!(
            "runs disagree: {} vs {} assertions",
            info.assert_stmts.len(),
            info.second_run.len()
        );
        return ExitCode::FAILURE;
    }

    println!("valid");
    if info.panics {
        println!("panics");
    }
    for stmt in info.accepted() {
        println!("{stmt}");
    }
    ExitCode::SUCCESS
}
