// crates/unitsynth-gen/src/overrides.rs
//! Hand-written values and ignore flags for specific files and functions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Manual values that replace synthesis for a receiver or parameter.
pub trait OverrideStore {
    /// Override expressions for a parameter, if any are configured.
    fn param_values(&self, file: &str, func: &str, param: &str) -> Option<&[String]>;
    /// Override expressions for a method receiver, if any are configured.
    fn receiver_values(&self, file: &str, func: &str) -> Option<&[String]>;
    fn ignores_function(&self, file: &str, func: &str) -> bool;
    fn ignores_file(&self, file: &str) -> bool;
}

/// Overrides for one function, `[[overrides.function]]` in the config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionOverride {
    /// File name (not path) declaring the function.
    pub file: String,
    pub name: String,
    pub receiver: Vec<String>,
    /// Parameter name -> override expressions.
    pub params: BTreeMap<String, Vec<String>>,
    /// Generate no test cases for this function.
    pub ignore: bool,
}

/// Table of manual overrides, the `[overrides]` config section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub ignore_files: Vec<String>,
    pub function: Vec<FunctionOverride>,
}

impl Overrides {
    fn find(&self, file: &str, func: &str) -> Option<&FunctionOverride> {
        self.function
            .iter()
            .find(|f| f.file == file && f.name == func)
    }
}

fn non_empty(values: &[String]) -> Option<&[String]> {
    (!values.is_empty()).then_some(values)
}

impl OverrideStore for Overrides {
    fn param_values(&self, file: &str, func: &str, param: &str) -> Option<&[String]> {
        self.find(file, func)?
            .params
            .get(param)
            .and_then(|values| non_empty(values))
    }

    fn receiver_values(&self, file: &str, func: &str) -> Option<&[String]> {
        non_empty(&self.find(file, func)?.receiver)
    }

    fn ignores_function(&self, file: &str, func: &str) -> bool {
        self.find(file, func).is_some_and(|f| f.ignore)
    }

    fn ignores_file(&self, file: &str) -> bool {
        self.ignore_files.iter().any(|f| f == file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
ignore_files = ["main.go"]

[[function]]
file = "shapes.go"
name = "Area"
receiver = ["Rect{W: 2, H: 3}"]
params = { scale = ["2", "3"], empty = [] }

[[function]]
file = "shapes.go"
name = "Debug"
ignore = true
"#;

    #[test]
    fn looks_up_receiver_and_params() {
        let overrides: Overrides = toml::from_str(TABLE).unwrap();
        assert_eq!(
            overrides.receiver_values("shapes.go", "Area"),
            Some(&["Rect{W: 2, H: 3}".to_string()][..])
        );
        assert_eq!(
            overrides
                .param_values("shapes.go", "Area", "scale")
                .map(<[String]>::len),
            Some(2)
        );
        assert_eq!(overrides.param_values("shapes.go", "Area", "empty"), None);
        assert_eq!(overrides.param_values("other.go", "Area", "scale"), None);
        assert_eq!(overrides.receiver_values("shapes.go", "Debug"), None);
    }

    #[test]
    fn ignore_flags() {
        let overrides: Overrides = toml::from_str(TABLE).unwrap();
        assert!(overrides.ignores_file("main.go"));
        assert!(!overrides.ignores_file("shapes.go"));
        assert!(overrides.ignores_function("shapes.go", "Debug"));
        assert!(!overrides.ignores_function("shapes.go", "Area"));
    }
}
