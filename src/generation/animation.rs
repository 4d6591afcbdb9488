use anyhow::{anyhow, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::generation::prompts;
use crate::providers::{GenerationRequest, TextGenerator};
use crate::timing::TimingModel;

/// Produces renderable Manim source keyed to the narration timing.
#[derive(Debug, Clone)]
pub struct AnimationCodeGenerator {
    llm: Arc<dyn TextGenerator>,
    scene_class: String,
}

impl AnimationCodeGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>, scene_class: impl Into<String>) -> Self {
        Self {
            llm,
            scene_class: scene_class.into(),
        }
    }

    /// Generate animation source for (prompt, script, timing).
    ///
    /// The timing model drives the prompt so the model can place animation
    /// beats where words are actually spoken. The returned source is fence
    /// stripped and non-empty, but not otherwise validated; the renderer is
    /// the real arbiter of whether it runs.
    pub async fn generate(
        &self,
        prompt: &str,
        script: &str,
        timing: &TimingModel,
    ) -> Result<String> {
        let request = GenerationRequest::new(prompts::animation_code_prompt(
            prompt,
            script,
            timing,
            &self.scene_class,
        ));

        let raw = self
            .llm
            .generate(request)
            .await
            .map_err(|e| anyhow!("Animation code generation request failed: {}", e))?;

        let source = prompts::strip_code_fence(&raw);
        if source.is_empty() {
            return Err(anyhow!("Generated animation source is empty"));
        }
        if !source.contains(&self.scene_class) {
            // Render will fail on the missing entry symbol; surface it early in the log
            warn!(
                "Generated source does not mention scene class '{}'",
                self.scene_class
            );
        }

        info!("Animation source generated ({} lines)", source.lines().count());
        Ok(source)
    }
}
