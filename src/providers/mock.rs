/*!
 * Mock service implementations for testing.
 *
 * This module provides fakes that simulate the external AI services:
 * - `MockTextGenerator::working()` - Always succeeds with canned text
 * - `MockTextGenerator::failing()` - Always fails with an error
 * - `MockSpeechSynthesizer::working()` - Audio bytes plus synthetic timing
 * - `MockSpeechSynthesizer::failing()` - Always fails with an error
 *
 * Every mock counts its calls through a shared atomic, so tests can assert
 * that a service was or was not invoked.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{GenerationRequest, SpeechOutput, SpeechSynthesizer, TextGenerator};
use crate::timing::CharTiming;

/// Behavior mode for the mock services
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an API error
    Failing,
    /// Succeeds but returns an empty body
    Empty,
    /// Simulates a slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock LLM text generator
#[derive(Debug)]
pub struct MockTextGenerator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of generate() calls, shared across clones
    call_count: Arc<AtomicUsize>,
    /// Canned response, when set
    response: Option<String>,
}

impl MockTextGenerator {
    /// Create a mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            response: None,
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set the canned response text
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// How many times generate() has been called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Handle to the shared call counter
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

impl Clone for MockTextGenerator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            response: self.response.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self
                .response
                .clone()
                .unwrap_or_else(|| format!("[GENERATED] {}", request.prompt))),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated text generation failure".to_string(),
            }),

            MockBehavior::Empty => Ok(String::new()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(self
                    .response
                    .clone()
                    .unwrap_or_else(|| format!("[GENERATED] {}", request.prompt)))
            }
        }
    }
}

/// Mock speech synthesizer with synthetic per-character timing
#[derive(Debug)]
pub struct MockSpeechSynthesizer {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of synthesize() calls, shared across clones
    call_count: Arc<AtomicUsize>,
    /// Seconds assigned to each character of the input
    seconds_per_char: f64,
}

impl MockSpeechSynthesizer {
    /// Create a mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            seconds_per_char: 0.1,
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Override the synthetic speaking rate
    pub fn with_seconds_per_char(mut self, seconds: f64) -> Self {
        self.seconds_per_char = seconds;
        self
    }

    /// How many times synthesize() has been called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Evenly spaced character timings for the text
    fn synthetic_timings(&self, text: &str) -> Vec<CharTiming> {
        text.chars()
            .enumerate()
            .map(|(i, c)| {
                CharTiming::new(
                    c,
                    i as f64 * self.seconds_per_char,
                    (i + 1) as f64 * self.seconds_per_char,
                )
            })
            .collect()
    }
}

impl Clone for MockSpeechSynthesizer {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
            seconds_per_char: self.seconds_per_char,
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<SpeechOutput, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(SpeechOutput {
                audio: b"ID3-mock-audio".to_vec(),
                char_timings: self.synthetic_timings(text),
            }),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 503,
                message: "Simulated speech synthesis failure".to_string(),
            }),

            MockBehavior::Empty => Ok(SpeechOutput {
                audio: Vec::new(),
                char_timings: Vec::new(),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(SpeechOutput {
                    audio: b"ID3-mock-audio".to_vec(),
                    char_timings: self.synthetic_timings(text),
                })
            }
        }
    }
}
