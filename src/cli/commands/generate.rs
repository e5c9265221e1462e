//! Podcast generation command.

use crate::cli::output::content_preview;
use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::{LineOutcome, PodcastReport, Podcaster};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub llm: Option<String>,
    pub tts: Option<String>,
    pub speed: Option<f32>,
    pub save_script: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Output name used when none is given: the UTC start time.
pub fn default_output_file(now: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!("{}.mp3", now.format("%Y-%m-%dT%H-%M-%SZ")))
}

/// Apply command-line overrides on top of the loaded settings.
fn apply_overrides(settings: &mut Settings, options: &GenerateOptions) {
    if let Some(llm) = &options.llm {
        settings.script.model = llm.clone();
    }
    if let Some(tts) = &options.tts {
        settings.speech.model = tts.clone();
    }
    if let Some(speed) = options.speed {
        settings.speech.speed = speed;
    }
}

/// Write the JSON run summary.
fn write_report(report: &PodcastReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, report.to_json()?)?;
    Ok(())
}

/// Run the generate command.
pub async fn run_generate(options: GenerateOptions, mut settings: Settings) -> Result<()> {
    apply_overrides(&mut settings, &options);

    if let Err(e) = preflight::check(&settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let output_file = options
        .output_file
        .clone()
        .unwrap_or_else(|| default_output_file(Utc::now()));

    let podcaster = Podcaster::new(settings)?.with_progress(true);

    let spinner = Output::spinner("Generating podcast script...");
    let script = podcaster.generate_script(options.input_file.as_deref()).await;
    spinner.finish_and_clear();
    let script = script?;

    if let Some(path) = &options.save_script {
        std::fs::write(path, script.as_str())?;
        Output::info(&format!("Script saved to {}", path.display()));
    }

    let report = podcaster.produce(script, &output_file).await?;

    Output::success(&format!(
        "Exported podcast audio to {}",
        report.audio.path.display()
    ));
    Output::kv("Dialogue lines", &report.dialogue_lines.to_string());
    Output::kv("Clips", &report.synthesis.synthesized().to_string());
    Output::kv("Skipped (empty)", &report.synthesis.skipped().to_string());

    if let Some(path) = &options.report {
        write_report(&report, path)?;
        Output::info(&format!("Run report saved to {}", path.display()));
    }

    let failed: Vec<&LineOutcome> = report.synthesis.failed().collect();
    if !failed.is_empty() {
        Output::warning(&format!("{} line(s) could not be voiced:", failed.len()));
        for outcome in failed {
            if let LineOutcome::Failed {
                index,
                speaker,
                text,
                error,
            } = outcome
            {
                Output::list_item(&format!(
                    "#{} {}: {} ({})",
                    index,
                    speaker,
                    content_preview(text, 60),
                    error
                ));
            }
        }
    }

    Ok(())
}
