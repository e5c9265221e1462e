//! Audio clip storage and assembly.

mod assembler;
mod scratch;

pub use assembler::{clip_frames, AudioAssembler};
pub use scratch::ScratchDir;

use serde::Serialize;
use std::path::PathBuf;

/// One synthesized dialogue line on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioClip {
    /// Position of the line in the parsed dialogue.
    pub index: usize,
    pub speaker: String,
    pub path: PathBuf,
}

/// The exported episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodcastAudio {
    pub path: PathBuf,
    /// Number of clips joined into the file.
    pub clip_count: usize,
    /// Size of the exported file.
    pub bytes: u64,
}
