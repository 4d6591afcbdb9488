/*!
 * # narrimate
 *
 * A Rust library for turning a natural-language prompt into a short animated
 * video with synchronized spoken narration.
 *
 * ## Pipeline
 *
 * One run generates a narration script, then forks into two concurrent
 * branches: speech synthesis (which also yields per-character timing) and
 * animation generation (which waits for that timing, generates Manim code
 * keyed to it, and renders the video). A run succeeds when at least one
 * branch produces its artifact; the other branch's failure is reported
 * alongside rather than discarding the successful half.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timing`: Character/word-level speech timing (`TimingModel`)
 * - `generation`: LLM-backed script and animation-code generation
 * - `providers`: Clients for the external AI services:
 *   - `providers::gemini`: Gemini text generation client
 *   - `providers::elevenlabs`: ElevenLabs TTS-with-timestamps client
 *   - `providers::mock`: substitutable fakes for tests
 * - `render`: Manim subprocess rendering
 * - `storage`: Run-scoped artifact persistence
 * - `pipeline`: The fork/join pipeline coordinator
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod generation;
pub mod pipeline;
pub mod providers;
pub mod render;
pub mod storage;
pub mod timing;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, PipelineError, ProviderError};
pub use pipeline::{PipelineCoordinator, PipelineOutcome};
pub use storage::{ArtifactKind, ArtifactStore, RunId};
pub use timing::{CharTiming, TimingModel, WordTiming};
