//! Configuration settings for Castwright.

use crate::speech::VoiceMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub script: ScriptSettings,
    pub speech: SpeechSettings,
    pub audio: AudioSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory under which per-run scratch directories are created.
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/castwright".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Script generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Chat model used to write the script.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 10_000,
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Text-to-speech model.
    pub model: String,
    /// Playback speed requested from the speech service.
    pub speed: f32,
    /// Voice used for speakers missing from `voices`.
    pub default_voice: String,
    /// Speaker tag to voice mapping.
    pub voices: BTreeMap<String, String>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        let voices = [("HOST1", "nova"), ("HOST2", "onyx"), ("HOST3", "echo")]
            .into_iter()
            .map(|(tag, voice)| (tag.to_string(), voice.to_string()))
            .collect();

        Self {
            model: "tts-1".to_string(),
            speed: 1.0,
            default_voice: "nova".to_string(),
            voices,
        }
    }
}

impl SpeechSettings {
    /// Build the voice map for a run.
    pub fn voice_map(&self) -> VoiceMap {
        VoiceMap::new(self.voices.clone(), &self.default_voice)
    }
}

/// Audio assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct AudioSettings {
    /// Pass the concatenated clips through ffmpeg instead of writing them as-is.
    pub reencode: bool,
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Default for PromptSettings {
    fn default() -> Self {
        let variables = [("host1_name", "Ali"), ("host2_name", "Craig")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            custom_dir: None,
            variables,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("castwright")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}
