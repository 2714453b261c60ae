// src/cli/args.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Unit-test input synthesis and runtime assertion decoding
#[derive(Parser)]
#[command(name = "unitsynth")]
#[command(version)]
#[command(about = "Synthesize Go unit-test inputs and decode runtime assertions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize test-case inputs for the root package of a source model
    #[command(visible_alias = "s")]
    Synth {
        /// JSON source model of the packages under test
        #[arg(long, value_name = "FILE")]
        model: PathBuf,

        /// Only synthesize for functions with this name
        #[arg(short, long)]
        function: Option<String>,

        /// Path to a unitsynth.toml config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Seed for value and name generation (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Decode a file of capture lines into assertions
    #[command(visible_alias = "d")]
    Decode {
        /// File with one JSON capture per line
        #[arg(value_name = "CAPTURES")]
        captures: PathBuf,
    },
    /// Check that two runs of the same test decode to identical assertions
    #[command(visible_alias = "v")]
    Validate {
        /// Captures of the first run
        #[arg(value_name = "FIRST")]
        first: PathBuf,

        /// Captures of the second run
        #[arg(value_name = "SECOND")]
        second: PathBuf,
    },
}
