//! Castwright - Documents to Podcasts
//!
//! A CLI tool that turns a document into a two-host podcast episode.
//!
//! # Overview
//!
//! Castwright:
//! - Extracts the text of a PDF
//! - Asks a language model for a scripted conversation between two hosts
//! - Voices every line with a text-to-speech service
//! - Joins the clips into a single MP3
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `document` - PDF text extraction
//! - `script` - Script generation and dialogue parsing
//! - `speech` - Text-to-speech synthesis and voice mapping
//! - `audio` - Scratch clip storage and assembly
//! - `pipeline` - Coordination of the stages
//!
//! # Example
//!
//! ```rust,no_run
//! use castwright::config::Settings;
//! use castwright::pipeline::Podcaster;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let podcaster = Podcaster::new(settings)?;
//!
//!     let report = podcaster
//!         .run(Some(Path::new("paper.pdf")), Path::new("episode.mp3"))
//!         .await?;
//!     println!("Joined {} clips", report.audio.clip_count);
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod script;
pub mod speech;

pub use error::{CastwrightError, Result};
