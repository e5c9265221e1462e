//! Text-to-speech synthesis for dialogue lines.

mod openai;

pub use openai::OpenAISpeechSynthesizer;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Trait for text-to-speech services.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the given voice and return encoded MP3 bytes.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>>;
}

/// Maps speaker tags to voice identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceMap {
    voices: BTreeMap<String, String>,
    default_voice: String,
}

impl VoiceMap {
    pub fn new(voices: BTreeMap<String, String>, default_voice: &str) -> Self {
        Self {
            voices,
            default_voice: default_voice.to_string(),
        }
    }

    /// Voice for a speaker, or the default voice when the tag is unmapped.
    pub fn voice_for(&self, speaker: &str) -> &str {
        self.voices
            .get(speaker)
            .map(String::as_str)
            .unwrap_or(&self.default_voice)
    }
}
