// src/config.rs
//! `unitsynth.toml`: generator options, value ranges and manual overrides.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use unitsynth_gen::{Options, Overrides, ValueConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: Options,
    pub values: ValueConfig,
    pub overrides: Overrides,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: display,
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            overrides = config.overrides.function.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Config from `path`, or the defaults when no path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitsynth_gen::OverrideStore;

    #[test]
    fn parses_all_sections() {
        let config: Config = toml::from_str(
            r#"
[generator]
max_recursion = 2
test_cases_per_func = 4
seed = 7

[values]
slice_len = [1, 3]
error_probability = 0.0

[overrides]
ignore_files = ["main.go"]

[[overrides.function]]
file = "shapes.go"
name = "Area"
receiver = ["Rect{W: 2, H: 3}"]
params = { scale = ["2", "3"] }
"#,
        )
        .unwrap();
        assert_eq!(config.generator.max_recursion, 2);
        assert_eq!(config.generator.test_cases_per_func, 4);
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.values.slice_len, (1, 3));
        assert_eq!(config.values.map_len, ValueConfig::default().map_len);
        assert!(config.overrides.ignores_file("main.go"));
        assert_eq!(
            config
                .overrides
                .param_values("shapes.go", "Area", "scale")
                .map(<[String]>::len),
            Some(2)
        );
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::load(Path::new("/nonexistent/unitsynth.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/unitsynth.toml"));
    }
}
