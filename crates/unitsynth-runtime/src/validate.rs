// crates/unitsynth-runtime/src/validate.rs
//! Determinism gate: assertions are kept only when two independent runs of
//! the same test input decode to the same printed statements.

use crate::decoder::Decoder;
use crate::stmt::StmtPrinter;

/// Decoded runtime information for one test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTimeInfo {
    pub is_valid: bool,
    /// Either run recorded a panic capture.
    pub panics: bool,
    pub assert_stmts: Vec<String>,
    pub second_run: Vec<String>,
}

impl RunTimeInfo {
    /// Compare both runs, store and return the verdict.
    pub fn set_is_valid(&mut self) -> bool {
        self.is_valid = self.assert_stmts == self.second_run;
        self.is_valid
    }

    /// Assertions to emit: empty unless both runs agreed.
    pub fn accepted(&self) -> &[String] {
        if self.is_valid {
            self.assert_stmts.as_slice()
        } else {
            &[]
        }
    }
}

/// Decode every capture line of one run with a fresh decoder and print the
/// statements in order.
pub fn decode_run<'a, I>(lines: I, printer: &dyn StmtPrinter) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    decode_lines(lines, printer).0
}

/// Printed statements of one run and whether it panicked.
fn decode_lines<'a, I>(lines: I, printer: &dyn StmtPrinter) -> (Vec<String>, bool)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut decoder = Decoder::new();
    let stmts = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .flat_map(|line| decoder.decode_line(line))
        .map(|stmt| printer.print_stmt(&stmt))
        .collect();
    (stmts, decoder.panicked())
}

/// Decode two runs independently and judge whether they agree.
pub fn validate_runs<'a, A, B>(first: A, second: B, printer: &dyn StmtPrinter) -> RunTimeInfo
where
    A: IntoIterator<Item = &'a str>,
    B: IntoIterator<Item = &'a str>,
{
    let (assert_stmts, first_panicked) = decode_lines(first, printer);
    let (second_run, second_panicked) = decode_lines(second, printer);
    let mut info = RunTimeInfo {
        panics: first_panicked || second_panicked,
        assert_stmts,
        second_run,
        ..RunTimeInfo::default()
    };
    if !info.set_is_valid() {
        tracing::debug!(
            first = info.assert_stmts.len(),
            second = info.second_run.len(),
            "runs decoded to different assertions"
        );
    }
    info
}
