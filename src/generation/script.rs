use anyhow::{anyhow, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::generation::prompts;
use crate::providers::{Attachment, GenerationRequest, TextGenerator};

/// Produces the narration script for a run.
///
/// A thin wrapper over the injected LLM client: builds the narration prompt,
/// forwards any reference document, and validates the result.
#[derive(Debug, Clone)]
pub struct ScriptGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl ScriptGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Generate a narration script for the prompt, optionally grounded in a
    /// reference document. The returned script is guaranteed non-empty.
    pub async fn generate(
        &self,
        prompt: &str,
        reference_document: Option<Attachment>,
    ) -> Result<String> {
        let mut request = GenerationRequest::new(prompts::narration_script_prompt(prompt));
        if let Some(document) = reference_document {
            debug!(
                "Attaching reference document ({}, {} bytes)",
                document.mime_type,
                document.data.len()
            );
            request = request.with_attachment(document);
        }

        let raw = self
            .llm
            .generate(request)
            .await
            .map_err(|e| anyhow!("Script generation request failed: {}", e))?;

        let script = prompts::strip_code_fence(&raw);
        if script.is_empty() {
            return Err(anyhow!("Generated narration script is empty"));
        }

        info!(
            "Narration script generated ({} words)",
            script.split_whitespace().count()
        );
        Ok(script)
    }
}
