use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::Config;
use crate::generation::{AnimationCodeGenerator, ScriptGenerator};
use crate::pipeline::{PipelineCoordinator, PipelineOutcome};
use crate::providers::elevenlabs::ElevenLabs;
use crate::providers::gemini::Gemini;
use crate::providers::{Attachment, SpeechSynthesizer, TextGenerator};
use crate::render::{ManimRenderer, Renderer};
use crate::storage::{ArtifactKind, ArtifactStore, RunId};

// @module: Application controller wiring config to the pipeline

/// Main application controller for narrated animation generation
pub struct Controller {
    config: Config,
    coordinator: PipelineCoordinator,
}

impl Controller {
    // @method: Create a controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let store = ArtifactStore::new(&config.storage.root)
            .context("Failed to initialize artifact storage")?;

        let llm: Arc<dyn TextGenerator> = Arc::new(Gemini::new(&config.generation));
        let speech: Arc<dyn SpeechSynthesizer> = Arc::new(ElevenLabs::new(&config.speech));
        let renderer: Arc<dyn Renderer> = Arc::new(ManimRenderer::new(
            config.renderer.clone(),
            store.root().join("render"),
        ));

        let coordinator = PipelineCoordinator::new(
            ScriptGenerator::new(Arc::clone(&llm)),
            speech,
            AnimationCodeGenerator::new(llm, config.renderer.scene_class.clone()),
            renderer,
            store,
        );

        Ok(Self {
            config,
            coordinator,
        })
    }

    /// Whether the controller has the credentials it needs to run
    pub fn is_initialized(&self) -> bool {
        !self.config.generation.api_key.is_empty() && !self.config.speech.api_key.is_empty()
    }

    /// Run the pipeline for a prompt, optionally with a reference document
    pub async fn run(
        &self,
        prompt: &str,
        reference_document: Option<&Path>,
    ) -> Result<PipelineOutcome> {
        let start_time = std::time::Instant::now();

        let attachment = match reference_document {
            Some(path) => Some(Self::load_reference_document(path)?),
            None => None,
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Generating narrated animation...");
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = self.coordinator.run(prompt, attachment).await;
        spinner.finish_and_clear();

        let outcome = result.map_err(|e| anyhow!("Pipeline failed: {}", e))?;
        Self::report(&outcome);
        info!(
            "Run {} completed in {}",
            outcome.run_id,
            Self::format_duration(start_time.elapsed())
        );

        Ok(outcome)
    }

    // @reads: Reference document into an attachment
    fn load_reference_document(path: &Path) -> Result<Attachment> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read reference document {:?}", path))?;

        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            return Err(anyhow!(
                "Reference document must be a PDF file: {:?}",
                path
            ));
        }

        Ok(Attachment::pdf(data))
    }

    /// Log a per-branch summary of the outcome
    fn report(outcome: &PipelineOutcome) {
        match (&outcome.audio, &outcome.audio_error) {
            (Some(artifact), _) => info!("Narration audio: {:?}", artifact.path),
            (None, Some(error)) => warn!("Audio branch failed: {}", error),
            _ => {}
        }
        if let Some(source) = &outcome.animation_source {
            info!("Animation source: {:?}", source);
        }
        match (&outcome.video, &outcome.video_error) {
            (Some(artifact), _) => info!("Rendered video: {:?}", artifact.path),
            (None, Some(error)) => warn!("Video branch failed: {}", error),
            _ => {}
        }
    }

    /// Read a run's narration script
    pub fn script_text(&self, run_id: &RunId) -> Result<String> {
        self.coordinator.store().read_text(ArtifactKind::Script, run_id)
    }

    /// Read a run's animation source
    pub fn animation_source(&self, run_id: &RunId) -> Result<String> {
        self.coordinator
            .store()
            .read_text(ArtifactKind::AnimationSource, run_id)
    }

    /// Path of a run's narration audio, if it exists
    pub fn audio_path(&self, run_id: &RunId) -> Option<PathBuf> {
        let store = self.coordinator.store();
        store
            .exists(ArtifactKind::Audio, run_id)
            .then(|| store.path_for(ArtifactKind::Audio, run_id))
    }

    /// Path of a run's rendered video, if it exists
    pub fn video_path(&self, run_id: &RunId) -> Option<PathBuf> {
        let store = self.coordinator.store();
        store
            .exists(ArtifactKind::Video, run_id)
            .then(|| store.path_for(ArtifactKind::Video, run_id))
    }

    // @formats: Duration as human-readable string
    fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs >= 60 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}.{:03}s", secs, duration.subsec_millis())
        }
    }
}
