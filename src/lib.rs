// src/lib.rs

// Public modules (the unitsynth driver API)
pub mod cli;
pub mod commands;
pub mod config;

pub use config::{Config, ConfigError};
