// crates/unitsynth-runtime/src/error.rs

use thiserror::Error;

/// A capture line that could not be parsed.
#[derive(Debug, Error)]
#[error("unable to parse runtime capture `{line}`: {source}")]
pub struct CaptureError {
    pub line: String,
    #[source]
    pub source: serde_json::Error,
}
