//! Configuration module for Castwright.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, ScriptPrompts};
pub use settings::{
    AudioSettings, GeneralSettings, PromptSettings, ScriptSettings, Settings, SpeechSettings,
};
