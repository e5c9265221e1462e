//! OpenAI speech synthesis implementation.

use super::SpeechSynthesizer;
use crate::config::SpeechSettings;
use crate::error::{CastwrightError, Result};
use crate::openai::create_client;
use async_openai::types::{CreateSpeechRequestArgs, SpeechModel, SpeechResponseFormat, Voice};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Speech synthesizer backed by the OpenAI audio speech API.
pub struct OpenAISpeechSynthesizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    speed: f32,
}

impl OpenAISpeechSynthesizer {
    /// Create a synthesizer from speech settings.
    pub fn with_config(settings: &SpeechSettings) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: settings.model.clone(),
            speed: settings.speed,
        })
    }
}

/// Map a model name onto the API's model type.
fn speech_model(name: &str) -> SpeechModel {
    match name {
        "tts-1" => SpeechModel::Tts1,
        "tts-1-hd" => SpeechModel::Tts1Hd,
        other => SpeechModel::Other(other.to_string()),
    }
}

/// Parse a voice identifier such as `nova` or `onyx`.
fn parse_voice(name: &str) -> Result<Voice> {
    match name.to_lowercase().as_str() {
        "alloy" => Ok(Voice::Alloy),
        "echo" => Ok(Voice::Echo),
        "fable" => Ok(Voice::Fable),
        "onyx" => Ok(Voice::Onyx),
        "nova" => Ok(Voice::Nova),
        "shimmer" => Ok(Voice::Shimmer),
        _ => Err(CastwrightError::Speech(format!("Unknown voice: {}", name))),
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeechSynthesizer {
    #[instrument(skip(self, text), fields(model = %self.model, chars = text.len()))]
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let request = CreateSpeechRequestArgs::default()
            .input(text)
            .voice(parse_voice(voice)?)
            .model(speech_model(&self.model))
            .speed(self.speed)
            .response_format(SpeechResponseFormat::Mp3)
            .build()
            .map_err(|e| CastwrightError::Speech(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| CastwrightError::OpenAI(format!("Speech API error: {}", e)))?;

        debug!("Received {} bytes of audio", response.bytes.len());
        Ok(response.bytes.to_vec())
    }
}
