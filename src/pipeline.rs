/*!
 * The synchronized generation pipeline.
 *
 * One run flows through three phases:
 * 1. Script generation (sequential, failure is fatal)
 * 2. Fork: an audio branch (speech synthesis + timing extraction) and a video
 *    branch (animation code generation + rendering) run concurrently. The
 *    video branch has a hard data dependency on the audio branch's
 *    TimingModel and blocks on a one-shot readiness signal until the audio
 *    branch has definitively succeeded or failed.
 * 3. Join: both branch results are merged into one `PipelineOutcome`. The run
 *    fails as a whole only when both branches failed.
 */

use futures::future;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::errors::PipelineError;
use crate::generation::{AnimationCodeGenerator, ScriptGenerator};
use crate::providers::{Attachment, SpeechSynthesizer};
use crate::render::Renderer;
use crate::storage::{ArtifactKind, ArtifactStore, RunId};
use crate::timing::TimingModel;

/// Persisted narration audio
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Location of the saved audio file
    pub path: PathBuf,
    /// Size of the audio payload in bytes
    pub byte_len: u64,
}

/// Persisted rendered video
#[derive(Debug, Clone)]
pub struct VideoArtifact {
    /// Location of the saved video file
    pub path: PathBuf,
}

/// The merged result of one pipeline run.
///
/// Audio and video fields are independent: whichever branch succeeded keeps
/// its artifact even when the other failed, and a failed branch leaves a
/// human-readable error string instead.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Identifier shared by all artifacts of this run
    pub run_id: RunId,
    /// The narration script (always present; generated before the fork)
    pub script: String,
    /// Narration audio, when the audio branch succeeded
    pub audio: Option<AudioArtifact>,
    /// Speech timing, when the audio branch succeeded
    pub timing: Option<Arc<TimingModel>>,
    /// Audio branch error, when it failed
    pub audio_error: Option<String>,
    /// Rendered video, when the video branch succeeded
    pub video: Option<VideoArtifact>,
    /// Persisted animation source, present whenever code generation succeeded
    /// (inspectable even if the render afterwards failed)
    pub animation_source: Option<PathBuf>,
    /// Video branch error, when it failed
    pub video_error: Option<String>,
}

impl PipelineOutcome {
    /// A run succeeds iff at least one branch produced its artifact
    pub fn is_success(&self) -> bool {
        self.audio.is_some() || self.video.is_some()
    }
}

struct AudioSuccess {
    artifact: AudioArtifact,
    timing: Arc<TimingModel>,
}

struct VideoBranchOutcome {
    animation_source: Option<PathBuf>,
    video: Result<VideoArtifact, PipelineError>,
}

/// Coordinates the script/audio/video stages of one run.
///
/// All collaborators are constructor-injected so tests can substitute fakes.
#[derive(Debug)]
pub struct PipelineCoordinator {
    script_generator: ScriptGenerator,
    speech: Arc<dyn SpeechSynthesizer>,
    code_generator: AnimationCodeGenerator,
    renderer: Arc<dyn Renderer>,
    store: ArtifactStore,
}

impl PipelineCoordinator {
    pub fn new(
        script_generator: ScriptGenerator,
        speech: Arc<dyn SpeechSynthesizer>,
        code_generator: AnimationCodeGenerator,
        renderer: Arc<dyn Renderer>,
        store: ArtifactStore,
    ) -> Self {
        Self {
            script_generator,
            speech,
            code_generator,
            renderer,
            store,
        }
    }

    /// Run the full pipeline for one prompt.
    ///
    /// Returns `Ok` when at least one branch succeeded; the outcome then
    /// carries per-branch artifacts and error strings. Returns `Err` only for
    /// a fatal script failure or when both branches failed.
    pub async fn run(
        &self,
        prompt: &str,
        reference_document: Option<Attachment>,
    ) -> Result<PipelineOutcome, PipelineError> {
        let run_id = RunId::now();
        info!("Pipeline run {} started", run_id);

        // Phase 1: nothing to narrate or animate without a script
        let script = self
            .script_generator
            .generate(prompt, reference_document)
            .await
            .map_err(|e| PipelineError::ScriptGeneration(e.to_string()))?;
        self.store
            .save_text(ArtifactKind::Script, &run_id, &script)
            .map_err(|e| {
                PipelineError::ScriptGeneration(format!("failed to persist script: {}", e))
            })?;

        // Phase 2: fork. The oneshot is the readiness signal between the
        // branches; branch A sends on it exactly once, on success and failure
        // alike, so branch B can never block forever.
        let (timing_tx, timing_rx) = oneshot::channel::<Option<Arc<TimingModel>>>();

        let audio_task = {
            let speech = Arc::clone(&self.speech);
            let store = self.store.clone();
            let script = script.clone();
            let run_id = run_id.clone();
            tokio::spawn(async move {
                let result = run_audio_branch(speech, store, &script, &run_id).await;
                let signal = match &result {
                    Ok(success) => Some(Arc::clone(&success.timing)),
                    Err(_) => None,
                };
                let _ = timing_tx.send(signal);
                result
            })
        };

        let video_task = {
            let code_generator = self.code_generator.clone();
            let renderer = Arc::clone(&self.renderer);
            let store = self.store.clone();
            let prompt = prompt.to_string();
            let script = script.clone();
            let run_id = run_id.clone();
            tokio::spawn(async move {
                // Hard data dependency: wait for the timing model (or the
                // definitive word that there will not be one). A dropped
                // sender counts as audio failure.
                let timing = match timing_rx.await {
                    Ok(Some(timing)) => timing,
                    Ok(None) | Err(_) => {
                        warn!("Audio branch failed, skipping animation generation");
                        return VideoBranchOutcome {
                            animation_source: None,
                            video: Err(PipelineError::UpstreamDependency),
                        };
                    }
                };
                run_video_branch(code_generator, renderer, store, &prompt, &script, &timing, &run_id)
                    .await
            })
        };

        // Phase 3: join. The only suspension point of the coordinator itself.
        let (audio_joined, video_joined) = future::join(audio_task, video_task).await;
        let audio_result = audio_joined.unwrap_or_else(|e| {
            Err(PipelineError::Audio(format!("audio branch aborted: {}", e)))
        });
        let video_outcome = video_joined.unwrap_or_else(|e| VideoBranchOutcome {
            animation_source: None,
            video: Err(PipelineError::CodeGen(format!("video branch aborted: {}", e))),
        });

        let mut outcome = PipelineOutcome {
            run_id,
            script,
            audio: None,
            timing: None,
            audio_error: None,
            video: None,
            animation_source: video_outcome.animation_source,
            video_error: None,
        };

        match audio_result {
            Ok(success) => {
                outcome.audio = Some(success.artifact);
                outcome.timing = Some(success.timing);
            }
            Err(e) => outcome.audio_error = Some(e.to_string()),
        }
        match video_outcome.video {
            Ok(artifact) => outcome.video = Some(artifact),
            Err(e) => outcome.video_error = Some(e.to_string()),
        }

        if !outcome.is_success() {
            return Err(PipelineError::MergedFailure {
                audio: outcome.audio_error.unwrap_or_default(),
                video: outcome.video_error.unwrap_or_default(),
            });
        }

        info!(
            "Pipeline run {} finished (audio: {}, video: {})",
            outcome.run_id,
            if outcome.audio.is_some() { "ok" } else { "failed" },
            if outcome.video.is_some() { "ok" } else { "failed" },
        );
        Ok(outcome)
    }

    /// The artifact store this coordinator persists into
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }
}

/// Branch A: synthesize narration, persist the audio, build the TimingModel
async fn run_audio_branch(
    speech: Arc<dyn SpeechSynthesizer>,
    store: ArtifactStore,
    script: &str,
    run_id: &RunId,
) -> Result<AudioSuccess, PipelineError> {
    let output = speech
        .synthesize(script)
        .await
        .map_err(|e| PipelineError::Audio(e.to_string()))?;

    // Persist before reporting success so a later crash leaves the artifact
    let path = store
        .save(ArtifactKind::Audio, run_id, &output.audio)
        .map_err(|e| PipelineError::Audio(format!("failed to persist audio: {}", e)))?;

    let byte_len = output.audio.len() as u64;
    let timing = Arc::new(TimingModel::from_characters(output.char_timings));
    info!(
        "Audio branch done: {} bytes, {:.2}s narration",
        byte_len,
        timing.total_duration()
    );

    Ok(AudioSuccess {
        artifact: AudioArtifact { path, byte_len },
        timing,
    })
}

/// Branch B (post-signal): generate animation code, persist it, render it
async fn run_video_branch(
    code_generator: AnimationCodeGenerator,
    renderer: Arc<dyn Renderer>,
    store: ArtifactStore,
    prompt: &str,
    script: &str,
    timing: &TimingModel,
    run_id: &RunId,
) -> VideoBranchOutcome {
    let source = match code_generator.generate(prompt, script, timing).await {
        Ok(source) => source,
        Err(e) => {
            return VideoBranchOutcome {
                animation_source: None,
                video: Err(PipelineError::CodeGen(e.to_string())),
            }
        }
    };

    // Persist the source verbatim before rendering is attempted, so it stays
    // inspectable when the render fails
    let source_path = match store.save_text(ArtifactKind::AnimationSource, run_id, &source) {
        Ok(path) => path,
        Err(e) => {
            return VideoBranchOutcome {
                animation_source: None,
                video: Err(PipelineError::CodeGen(format!(
                    "failed to persist animation source: {}",
                    e
                ))),
            }
        }
    };

    let target = store.path_for(ArtifactKind::Video, run_id);
    let video = match renderer.render(&source_path, &target).await {
        Ok(path) => Ok(VideoArtifact { path }),
        Err(failure) => Err(PipelineError::Render {
            status: failure.status,
            diagnostics: failure.diagnostics,
        }),
    };

    VideoBranchOutcome {
        animation_source: Some(source_path),
        video,
    }
}
