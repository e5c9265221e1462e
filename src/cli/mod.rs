//! CLI module for Castwright.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::Parser;
use std::path::PathBuf;

/// Castwright - turn documents into two-host podcast episodes
///
/// Extracts the text of a PDF, has a language model script a conversation
/// between two hosts, voices every line and joins the audio into one MP3.
#[derive(Parser, Debug)]
#[command(name = "castwright")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input document (PDF)
    #[arg(short, long = "input-file", alias = "input_file")]
    pub input_file: Option<PathBuf>,

    /// Output MP3 file (defaults to a UTC timestamp)
    #[arg(short, long = "output-file", alias = "output_file")]
    pub output_file: Option<PathBuf>,

    /// Model name for the script-writing LLM
    #[arg(long)]
    pub llm: Option<String>,

    /// Model name for text-to-speech
    #[arg(long)]
    pub tts: Option<String>,

    /// Speech speed (0.25-4.0)
    #[arg(long)]
    pub speed: Option<f32>,

    /// Also write the generated script to this file
    #[arg(long)]
    pub save_script: Option<PathBuf>,

    /// Write a JSON summary of the run (per-line outcomes, output file) to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_original_flag_spellings() {
        let cli = Cli::parse_from([
            "castwright",
            "--input_file",
            "paper.pdf",
            "--output_file",
            "show.mp3",
            "--llm",
            "gpt-4.1",
        ]);
        assert_eq!(cli.input_file, Some(PathBuf::from("paper.pdf")));
        assert_eq!(cli.output_file, Some(PathBuf::from("show.mp3")));
        assert_eq!(cli.llm.as_deref(), Some("gpt-4.1"));
        assert!(cli.tts.is_none());
    }

    #[test]
    fn test_input_is_optional_at_parse_time() {
        let cli = Cli::parse_from(["castwright", "-vv"]);
        assert!(cli.input_file.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_report_flag() {
        let cli = Cli::parse_from(["castwright", "-i", "a.pdf", "--report", "run.json"]);
        assert_eq!(cli.report, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
