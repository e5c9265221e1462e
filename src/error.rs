//! Error types for Castwright.

use thiserror::Error;

/// Library-level error type for Castwright operations.
#[derive(Error, Debug)]
pub enum CastwrightError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No input file given. Pass a document with --input-file.")]
    MissingInput,

    #[error("Script generation failed: {0}")]
    Script(String),

    #[error("Speech synthesis failed: {0}")]
    Speech(String),

    #[error("Audio assembly failed: {0}")]
    Audio(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Castwright operations.
pub type Result<T> = std::result::Result<T, CastwrightError>;
