use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::SpeechConfig;
use crate::errors::ProviderError;
use crate::providers::{SpeechOutput, SpeechSynthesizer};
use crate::timing::CharTiming;

/// ElevenLabs client for text-to-speech with character timestamps
#[derive(Debug)]
pub struct ElevenLabs {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
    /// Voice identifier
    voice_id: String,
    /// TTS model identifier
    model: String,
    /// Voice settings forwarded to the API
    voice_settings: VoiceSettings,
}

#[derive(Debug, Clone, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// Request body for the with-timestamps endpoint
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// Response body: base64 audio plus parallel character alignment arrays
#[derive(Debug, Deserialize)]
struct SpeechResponse {
    audio_base64: String,
    alignment: Option<Alignment>,
}

#[derive(Debug, Deserialize)]
struct Alignment {
    characters: Vec<String>,
    character_start_times_seconds: Vec<f64>,
    character_end_times_seconds: Vec<f64>,
}

impl ElevenLabs {
    /// Create a new ElevenLabs client from the speech config
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.clone(),
            voice_id: config.voice_id.clone(),
            model: config.model.clone(),
            voice_settings: VoiceSettings {
                stability: config.stability,
                similarity_boost: config.similarity_boost,
            },
        }
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://api.elevenlabs.io"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!(
            "{}/v1/text-to-speech/{}/with-timestamps",
            base, self.voice_id
        )
    }

    /// Zip the alignment arrays into character timings
    fn alignment_to_timings(alignment: &Alignment) -> Result<Vec<CharTiming>, ProviderError> {
        if alignment.characters.len() != alignment.character_start_times_seconds.len()
            || alignment.characters.len() != alignment.character_end_times_seconds.len()
        {
            return Err(ProviderError::ParseError(format!(
                "Alignment arrays have mismatched lengths: {} chars, {} starts, {} ends",
                alignment.characters.len(),
                alignment.character_start_times_seconds.len(),
                alignment.character_end_times_seconds.len()
            )));
        }

        let mut timings = Vec::with_capacity(alignment.characters.len());
        for (i, entry) in alignment.characters.iter().enumerate() {
            // The API sends each character as a one-element string
            let character = entry.chars().next().ok_or_else(|| {
                ProviderError::ParseError(format!("Empty character at alignment index {}", i))
            })?;
            timings.push(CharTiming::new(
                character,
                alignment.character_start_times_seconds[i],
                alignment.character_end_times_seconds[i],
            ));
        }
        Ok(timings)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabs {
    async fn synthesize(&self, text: &str) -> Result<SpeechOutput, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "ElevenLabs API key is not set".to_string(),
            ));
        }

        let body = SpeechRequest {
            text,
            model_id: &self.model,
            voice_settings: &self.voice_settings,
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::RequestFailed(format!("ElevenLabs request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("ElevenLabs API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let speech_response = response.json::<SpeechResponse>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse ElevenLabs response: {}", e))
        })?;

        let audio = BASE64.decode(&speech_response.audio_base64).map_err(|e| {
            ProviderError::ParseError(format!("Failed to decode audio payload: {}", e))
        })?;

        let char_timings = match &speech_response.alignment {
            Some(alignment) => Self::alignment_to_timings(alignment)?,
            None => {
                return Err(ProviderError::ParseError(
                    "ElevenLabs response carried no alignment data".to_string(),
                ))
            }
        };

        Ok(SpeechOutput {
            audio,
            char_timings,
        })
    }
}
