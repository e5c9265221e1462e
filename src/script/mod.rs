//! Podcast script generation and dialogue parsing.

mod dialogue;
mod generator;
mod openai;

pub use dialogue::{count_tagged_lines, parse_dialogue, DialogueLine, HOST1, HOST2};
pub use generator::ScriptGenerator;
pub use openai::OpenAIScriptWriter;

use crate::error::Result;
use async_trait::async_trait;

/// A system/user message pair sent to a completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    pub system: String,
    pub user: String,
}

/// Trait for services that write a script from a prompt.
#[async_trait]
pub trait ScriptWriter: Send + Sync {
    /// Send the prompt and return the raw generated text.
    async fn write_script(&self, request: &ScriptRequest) -> Result<String>;
}

/// Raw script text returned by the model, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(String);

impl Script {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the script into dialogue lines.
    pub fn dialogue(&self) -> Vec<DialogueLine> {
        parse_dialogue(&self.0)
    }
}
