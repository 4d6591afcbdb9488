/*!
 * Error types for the narrimate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to an external AI service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Per-run pipeline errors, one variant per failure point.
///
/// Leaf errors are converted into these at the branch boundary; nothing past
/// the join point ever sees a raw provider or I/O error.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Script generation failed - fatal, no branch is started
    #[error("Script generation failed: {0}")]
    ScriptGeneration(String),

    /// Speech synthesis failed - audio branch error
    #[error("Speech synthesis failed: {0}")]
    Audio(String),

    /// The video branch could not proceed because the audio branch failed
    #[error("Upstream audio/timing unavailable, animation not attempted")]
    UpstreamDependency,

    /// Animation code generation failed - video branch error
    #[error("Animation code generation failed: {0}")]
    CodeGen(String),

    /// The rendering subprocess failed or produced no output file
    #[error("Render failed ({status}): {diagnostics}")]
    Render {
        /// Exit status description of the rendering process
        status: String,
        /// Captured stdout/stderr from the renderer
        diagnostics: String,
    },

    /// Both branches failed - the only case where the run as a whole fails
    #[error("Both branches failed - audio: {audio}; video: {video}")]
    MergedFailure {
        /// The audio branch error message
        audio: String,
        /// The video branch error message
        video: String,
    },
}

impl PipelineError {
    /// Whether this error terminates the whole run rather than one branch
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ScriptGeneration(_) | Self::MergedFailure { .. })
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the generation pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
