/*!
 * Common test utilities for the narrimate test suite
 */

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use narrimate::generation::{AnimationCodeGenerator, ScriptGenerator};
use narrimate::providers::mock::{MockSpeechSynthesizer, MockTextGenerator};
use narrimate::render::{RenderFailure, Renderer};
use narrimate::{ArtifactStore, PipelineCoordinator};

/// Fake renderer that either writes the target file or fails with diagnostics
#[derive(Debug)]
pub struct FakeRenderer {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeRenderer {
    pub fn working() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn render(&self, _source: &Path, target: &Path) -> Result<PathBuf, RenderFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RenderFailure {
                status: "exit status: 1".to_string(),
                diagnostics: "Simulated render failure: LaTeX Error".to_string(),
            });
        }
        std::fs::write(target, b"fake-mp4").map_err(|e| RenderFailure {
            status: "write failed".to_string(),
            diagnostics: e.to_string(),
        })?;
        Ok(target.to_path_buf())
    }
}

/// A fully wired coordinator over mocks, with handles to every fake
pub struct PipelineFixture {
    /// Keeps the artifact directory alive for the test's duration
    pub store_dir: TempDir,
    pub store: ArtifactStore,
    pub script_llm: MockTextGenerator,
    pub code_llm: MockTextGenerator,
    pub speech: MockSpeechSynthesizer,
    pub renderer: Arc<FakeRenderer>,
    pub coordinator: PipelineCoordinator,
}

impl PipelineFixture {
    /// Build a coordinator from the given fakes.
    ///
    /// The fixture keeps clones of the mocks; call counters are shared, so
    /// assertions on the fixture's handles observe the coordinator's calls.
    pub fn new(
        script_llm: MockTextGenerator,
        code_llm: MockTextGenerator,
        speech: MockSpeechSynthesizer,
        renderer: FakeRenderer,
    ) -> Self {
        let store_dir = TempDir::new().expect("temp dir");
        let store = ArtifactStore::new(store_dir.path()).expect("artifact store");
        let renderer = Arc::new(renderer);

        let coordinator = PipelineCoordinator::new(
            ScriptGenerator::new(Arc::new(script_llm.clone())),
            Arc::new(speech.clone()),
            AnimationCodeGenerator::new(Arc::new(code_llm.clone()), "GeneratedScene"),
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            store.clone(),
        );

        Self {
            store_dir,
            store,
            script_llm,
            code_llm,
            speech,
            renderer,
            coordinator,
        }
    }

    /// Fixture where every stage succeeds
    pub fn all_working() -> Self {
        Self::new(
            MockTextGenerator::working().with_response("Vector addition is simple"),
            MockTextGenerator::working()
                .with_response("from manim import *\n\nclass GeneratedScene(Scene):\n    def construct(self):\n        pass"),
            MockSpeechSynthesizer::working(),
            FakeRenderer::working(),
        )
    }
}
