/*!
 * Client implementations for the external AI services.
 *
 * This module contains the service traits the pipeline is written against and
 * the concrete clients:
 * - Gemini: LLM text generation (scripts and animation code)
 * - ElevenLabs: speech synthesis with character-level timing
 * - Mock: substitutable fakes for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::timing::CharTiming;

/// A document attached to a generation request (e.g. an uploaded PDF)
#[derive(Debug, Clone)]
pub struct Attachment {
    /// MIME type of the document
    pub mime_type: String,
    /// Raw document bytes
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn pdf(data: Vec<u8>) -> Self {
        Self {
            mime_type: "application/pdf".to_string(),
            data,
        }
    }
}

/// A text generation request: a prompt plus optional document attachments
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// The prompt text
    pub prompt: String,
    /// Reference documents the model should read alongside the prompt
    pub attachments: Vec<Attachment>,
}

impl GenerationRequest {
    /// Create a request with just a prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachments: Vec::new(),
        }
    }

    /// Attach a reference document
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Speech synthesis output: the audio bytes plus per-character timing
#[derive(Debug, Clone)]
pub struct SpeechOutput {
    /// Encoded audio bytes (mp3)
    pub audio: Vec<u8>,
    /// Start/end time of each character of the input text, in seconds
    pub char_timings: Vec<CharTiming>,
}

/// LLM text service used by the script and animation-code generators
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Generate text for the request
    ///
    /// # Arguments
    /// * `request` - Prompt and any reference documents
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The generated text or an error
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;
}

/// TTS service that reports per-character timing alongside the audio
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize speech for the text
    ///
    /// # Arguments
    /// * `text` - The narration text to speak
    ///
    /// # Returns
    /// * `Result<SpeechOutput, ProviderError>` - Audio and timing, or an error
    async fn synthesize(&self, text: &str) -> Result<SpeechOutput, ProviderError>;
}

pub mod elevenlabs;
pub mod gemini;
pub mod mock;
