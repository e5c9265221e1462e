//! Script generation from a source document.

use super::{count_tagged_lines, Script, ScriptRequest, ScriptWriter};
use crate::config::Prompts;
use crate::document::extract_text;
use crate::error::{CastwrightError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Where the extracted text goes in the user prompt.
const DOCUMENT_PLACEHOLDER: &str = "{{document}}";

/// Builds the script prompt for a document and asks a [`ScriptWriter`] for the script.
pub struct ScriptGenerator {
    writer: Arc<dyn ScriptWriter>,
    prompts: Prompts,
}

impl ScriptGenerator {
    pub fn new(writer: Arc<dyn ScriptWriter>, prompts: Prompts) -> Self {
        Self { writer, prompts }
    }

    /// Build the request for a document's extracted text.
    ///
    /// Config variables are rendered into the template first; the document is
    /// spliced in afterwards so its text is never scanned for placeholders.
    pub fn build_request(&self, document_text: &str) -> ScriptRequest {
        let no_vars = HashMap::new();
        let user_template = self
            .prompts
            .render_with_custom(&self.prompts.script.user, &no_vars);

        let user = match user_template.split_once(DOCUMENT_PLACEHOLDER) {
            Some((before, after)) => format!("{}{}{}", before, document_text, after),
            None => format!("{}\n{}", user_template, document_text),
        };

        ScriptRequest {
            system: self
                .prompts
                .render_with_custom(&self.prompts.script.system, &no_vars),
            user,
        }
    }

    /// Extract the document and generate a script for it.
    ///
    /// An empty extraction still produces a request.
    #[instrument(skip(self))]
    pub async fn generate(&self, input_file: Option<&Path>) -> Result<Script> {
        let input = match input_file {
            Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
            _ => return Err(CastwrightError::MissingInput),
        };

        let document_text = tokio::task::spawn_blocking(move || extract_text(&input))
            .await
            .map_err(|e| CastwrightError::Script(format!("Text extraction task failed: {}", e)))?;
        info!("Extracted {} chars of document text", document_text.len());

        let request = self.build_request(&document_text);
        let raw = self.writer.write_script(&request).await?;
        let script = Script::new(raw.trim());

        if count_tagged_lines(script.as_str()) == 0 {
            warn!("Generated script has no HOST1:/HOST2: lines; the podcast will be empty");
        }

        Ok(script)
    }
}
