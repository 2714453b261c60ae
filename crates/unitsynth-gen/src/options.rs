// crates/unitsynth-gen/src/options.rs

use serde::{Deserialize, Serialize};

/// How often a named struct or interface may be re-entered on one
/// synthesis path before its memoized skeleton is reused.
pub const DEFAULT_MAX_RECURSION: usize = 3;

/// Test cases synthesized per function.
pub const DEFAULT_TEST_CASES_PER_FUNC: usize = 18;

/// Generator settings, read from the `[generator]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub max_recursion: usize,
    pub test_cases_per_func: usize,
    /// Seed for the value policy. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_recursion: DEFAULT_MAX_RECURSION,
            test_cases_per_func: DEFAULT_TEST_CASES_PER_FUNC,
            seed: None,
        }
    }
}
