// src/bin/unitsynth.rs

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use unitsynth::cli::{Cli, Commands};
use unitsynth::commands::decode::decode_file;
use unitsynth::commands::synth::{SynthOptions, synth_model};
use unitsynth::commands::validate::validate_files;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn main() -> ExitCode {
    // Initialize tracing if UNITSYNTH_LOG is set
    // UNITSYNTH_LOG_STYLE: "compact" (default) or "full" (with timestamps)
    if let Ok(filter) = EnvFilter::try_from_env("UNITSYNTH_LOG") {
        let style = std::env::var("UNITSYNTH_LOG_STYLE").unwrap_or_default();
        if style == "full" {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_timer(NoTimestamp)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        }
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            model,
            function,
            config,
            seed,
        } => synth_model(SynthOptions {
            model: &model,
            function: function.as_deref(),
            config: config.as_deref(),
            seed,
        }),
        Commands::Decode { captures } => decode_file(&captures),
        Commands::Validate { first, second } => validate_files(&first, &second),
    }
}
