//! Castwright CLI entry point.

use anyhow::Result;
use castwright::cli::commands::{self, GenerateOptions};
use castwright::cli::Cli;
use castwright::config::Settings;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging; -v flags win over the configured level
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("castwright={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let options = GenerateOptions {
        input_file: cli.input_file,
        output_file: cli.output_file,
        llm: cli.llm,
        tts: cli.tts,
        speed: cli.speed,
        save_script: cli.save_script,
        report: cli.report,
    };

    commands::run_generate(options, settings).await
}
