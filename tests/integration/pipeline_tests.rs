/*!
 * Integration tests for the fork/join pipeline.
 *
 * These run the real coordinator over mock services and a temp-dir artifact
 * store, and assert the per-branch merge semantics: a run succeeds when at
 * least one branch delivered its artifact, the video branch never starts
 * animation work without the audio branch's timing, and every artifact of a
 * run shares one identifier on disk.
 */

use std::time::Duration;

use narrimate::providers::mock::{MockSpeechSynthesizer, MockTextGenerator};
use narrimate::{ArtifactKind, PipelineError};

use crate::common::{FakeRenderer, PipelineFixture};

#[tokio::test]
async fn test_bothBranchesSucceed_shouldProduceAllArtifacts() {
    let fixture = PipelineFixture::all_working();

    let outcome = fixture
        .coordinator
        .run("explain vector addition", None)
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.script, "Vector addition is simple");
    assert!(outcome.audio_error.is_none());
    assert!(outcome.video_error.is_none());

    let audio = outcome.audio.as_ref().unwrap();
    assert!(audio.path.is_file());
    assert!(audio.byte_len > 0);
    assert!(outcome.video.as_ref().unwrap().path.is_file());
    assert!(outcome.animation_source.as_ref().unwrap().is_file());

    // Timing covers the synthesized narration
    let timing = outcome.timing.as_ref().unwrap();
    assert_eq!(timing.text(), outcome.script);
    assert!(timing.total_duration() > 0.0);

    assert_eq!(fixture.script_llm.call_count(), 1);
    assert_eq!(fixture.code_llm.call_count(), 1);
    assert_eq!(fixture.speech.call_count(), 1);
    assert_eq!(fixture.renderer.call_count(), 1);
}

#[tokio::test]
async fn test_runArtifacts_shouldShareOneIdentifierOnDisk() {
    let fixture = PipelineFixture::all_working();
    let outcome = fixture.coordinator.run("explain tides", None).await.unwrap();

    for kind in [
        ArtifactKind::Script,
        ArtifactKind::Audio,
        ArtifactKind::AnimationSource,
        ArtifactKind::Video,
    ] {
        assert!(
            fixture.store.exists(kind, &outcome.run_id),
            "missing {:?} for run {}",
            kind,
            outcome.run_id
        );
    }
    assert_eq!(
        fixture
            .store
            .read_text(ArtifactKind::Script, &outcome.run_id)
            .unwrap(),
        outcome.script
    );
}

#[tokio::test]
async fn test_speechFailure_shouldSkipAnimationAndFailTheRun() {
    let fixture = PipelineFixture::new(
        MockTextGenerator::working().with_response("A script."),
        MockTextGenerator::working().with_response("from manim import *"),
        MockSpeechSynthesizer::failing(),
        FakeRenderer::working(),
    );

    let error = fixture
        .coordinator
        .run("explain gravity", None)
        .await
        .unwrap_err();

    match error {
        PipelineError::MergedFailure { audio, video } => {
            assert!(audio.contains("Simulated speech synthesis failure"));
            assert!(video.contains("Upstream audio/timing unavailable"));
        }
        other => panic!("expected MergedFailure, got {:?}", other),
    }

    // The video branch must never have started animation work
    assert_eq!(fixture.code_llm.call_count(), 0);
    assert_eq!(fixture.renderer.call_count(), 0);
}

#[tokio::test]
async fn test_renderFailure_shouldKeepAudioAndAnimationSource() {
    let fixture = PipelineFixture::new(
        MockTextGenerator::working().with_response("A script."),
        MockTextGenerator::working().with_response("from manim import *"),
        MockSpeechSynthesizer::working(),
        FakeRenderer::failing(),
    );

    let outcome = fixture.coordinator.run("explain pi", None).await.unwrap();

    assert!(outcome.is_success());
    assert!(outcome.audio.is_some());
    assert!(outcome.video.is_none());

    // The failed render keeps its source inspectable and its diagnostics
    let source_path = outcome.animation_source.as_ref().unwrap();
    assert!(source_path.is_file());
    let video_error = outcome.video_error.as_ref().unwrap();
    assert!(video_error.contains("Simulated render failure"));
}

#[tokio::test]
async fn test_codeGenFailure_shouldKeepAudio() {
    let fixture = PipelineFixture::new(
        MockTextGenerator::working().with_response("A script."),
        MockTextGenerator::failing(),
        MockSpeechSynthesizer::working(),
        FakeRenderer::working(),
    );

    let outcome = fixture.coordinator.run("explain sound", None).await.unwrap();

    assert!(outcome.is_success());
    assert!(outcome.audio.is_some());
    assert!(outcome.video.is_none());
    assert!(outcome.animation_source.is_none());
    assert!(outcome.video_error.is_some());
    assert_eq!(fixture.renderer.call_count(), 0);
}

#[tokio::test]
async fn test_scriptFailure_shouldBeFatalBeforeTheFork() {
    let fixture = PipelineFixture::new(
        MockTextGenerator::failing(),
        MockTextGenerator::working(),
        MockSpeechSynthesizer::working(),
        FakeRenderer::working(),
    );

    let error = fixture
        .coordinator
        .run("explain anything", None)
        .await
        .unwrap_err();

    assert!(matches!(error, PipelineError::ScriptGeneration(_)));
    assert_eq!(fixture.speech.call_count(), 0);
    assert_eq!(fixture.code_llm.call_count(), 0);
    assert_eq!(fixture.renderer.call_count(), 0);
}

#[tokio::test]
async fn test_videoBranch_shouldNotBlockWhenAudioIsSlow() {
    // The readiness signal fires once on success; the run completes well
    // within the timeout even when audio takes a while.
    let fixture = PipelineFixture::new(
        MockTextGenerator::working().with_response("A script."),
        MockTextGenerator::working().with_response("from manim import *"),
        MockSpeechSynthesizer::new(narrimate::providers::mock::MockBehavior::Slow {
            delay_ms: 100,
        }),
        FakeRenderer::working(),
    );

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        fixture.coordinator.run("explain light", None),
    )
    .await
    .expect("pipeline must not hang on a slow audio branch")
    .unwrap();

    assert!(outcome.audio.is_some());
    assert!(outcome.video.is_some());
}

#[tokio::test]
async fn test_videoBranch_shouldNotBlockWhenAudioFails() {
    // The readiness signal fires on failure too, so the video branch bails
    // out promptly instead of waiting forever.
    let fixture = PipelineFixture::new(
        MockTextGenerator::working().with_response("A script."),
        MockTextGenerator::working().with_response("from manim import *"),
        MockSpeechSynthesizer::failing(),
        FakeRenderer::working(),
    );

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        fixture.coordinator.run("explain heat", None),
    )
    .await
    .expect("pipeline must not hang when the audio branch fails");

    assert!(result.is_err());
    assert_eq!(fixture.renderer.call_count(), 0);
}
