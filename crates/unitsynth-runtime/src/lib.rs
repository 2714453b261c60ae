// crates/unitsynth-runtime/src/lib.rs
//! Turns runtime captures of an executed test case into assertions, and
//! accepts them only when two runs agree.

pub mod capture;
pub mod decoder;
pub mod error;
pub mod stmt;
pub mod validate;

pub use capture::{Capture, CaptureKind};
pub use decoder::{Decoder, Replacement, TypeCorrection};
pub use error::CaptureError;
pub use stmt::{AssertKind, AssignKind, Stmt, StmtPrinter, SuitePrinter};
pub use validate::{RunTimeInfo, decode_run, validate_runs};
