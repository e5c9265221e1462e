//! OpenAI chat-completion script writer.

use super::{ScriptRequest, ScriptWriter};
use crate::config::ScriptSettings;
use crate::error::{CastwrightError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Script writer backed by the OpenAI chat completions API.
pub struct OpenAIScriptWriter {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIScriptWriter {
    /// Create a writer from script settings.
    pub fn with_config(settings: &ScriptSettings) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }
}

#[async_trait]
impl ScriptWriter for OpenAIScriptWriter {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn write_script(&self, request: &ScriptRequest) -> Result<String> {
        info!("Requesting podcast script");
        debug!("Prompt is {} chars", request.user.len());

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(|e| CastwrightError::Script(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(|e| CastwrightError::Script(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_completion_tokens(self.max_tokens)
            .build()
            .map_err(|e| CastwrightError::Script(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| CastwrightError::OpenAI(format!("Failed to generate script: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| CastwrightError::OpenAI("Empty response from LLM".to_string()))?
            .clone();

        debug!("Received script of {} chars", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_uses_configured_model() {
        let settings = ScriptSettings {
            model: "gpt-4.1-mini".to_string(),
            ..ScriptSettings::default()
        };
        let writer = OpenAIScriptWriter::with_config(&settings).unwrap();
        assert_eq!(writer.model, "gpt-4.1-mini");
        assert_eq!(writer.max_tokens, 10_000);
    }
}
