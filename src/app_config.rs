use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Text generation (LLM) config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Speech synthesis config
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Rendering engine config
    #[serde(default)]
    pub renderer: RendererConfig,

    /// Artifact storage config
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// LLM text generation settings (Gemini)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Model name
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// API endpoint URL (optional, defaults to public API)
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,

    /// Temperature for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum output tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            api_key: String::new(),
            endpoint: default_generation_endpoint(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// Speech synthesis settings (ElevenLabs)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// API endpoint URL (optional, defaults to public API)
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,

    /// Voice identifier
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    /// TTS model identifier
    #[serde(default = "default_speech_model")]
    pub model: String,

    /// Voice stability (0.0 to 1.0)
    #[serde(default = "default_stability")]
    pub stability: f32,

    /// Voice similarity boost (0.0 to 1.0)
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f32,

    /// Request timeout in seconds
    #[serde(default = "default_speech_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_speech_endpoint(),
            voice_id: default_voice_id(),
            model: default_speech_model(),
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            timeout_secs: default_speech_timeout_secs(),
        }
    }
}

/// Rendering engine settings (Manim)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RendererConfig {
    /// Renderer binary name or path
    #[serde(default = "default_renderer_binary")]
    pub binary: String,

    /// Quality flag passed to the renderer (ql, qm, qh)
    #[serde(default = "default_renderer_quality")]
    pub quality: String,

    /// Output container format
    #[serde(default = "default_renderer_format")]
    pub format: String,

    /// Entry scene class the generated code must define
    #[serde(default = "default_scene_class")]
    pub scene_class: String,

    /// Render timeout in seconds
    #[serde(default = "default_render_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary: default_renderer_binary(),
            quality: default_renderer_quality(),
            format: default_renderer_format(),
            scene_class: default_scene_class(),
            timeout_secs: default_render_timeout_secs(),
        }
    }
}

/// Artifact storage settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory under which per-kind artifact directories live
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_generation_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_generation_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    8000
}

fn default_generation_timeout_secs() -> u64 {
    120
}

fn default_speech_endpoint() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_voice_id() -> String {
    // "Rachel", the provider's stock narration voice
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_speech_model() -> String {
    "eleven_turbo_v2_5".to_string()
}

fn default_stability() -> f32 {
    0.5
}

fn default_similarity_boost() -> f32 {
    0.75
}

fn default_speech_timeout_secs() -> u64 {
    60
}

fn default_renderer_binary() -> String {
    "manim".to_string()
}

fn default_renderer_quality() -> String {
    // Low quality renders fastest; callers can bump to qm/qh in config
    "ql".to_string()
}

fn default_renderer_format() -> String {
    "mp4".to_string()
}

fn default_scene_class() -> String {
    "GeneratedScene".to_string()
}

fn default_render_timeout_secs() -> u64 {
    600
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("media")
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.generation.api_key.is_empty() {
            return Err(anyhow!("Generation API key is required (generation.api_key)"));
        }

        if self.speech.api_key.is_empty() {
            return Err(anyhow!("Speech API key is required (speech.api_key)"));
        }

        if self.renderer.scene_class.is_empty() {
            return Err(anyhow!("Renderer scene class must not be empty"));
        }

        if !(0.0..=1.0).contains(&self.speech.stability) {
            return Err(anyhow!(
                "Voice stability must be between 0.0 and 1.0, got {}",
                self.speech.stability
            ));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            )
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e))?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            generation: GenerationConfig::default(),
            speech: SpeechConfig::default(),
            renderer: RendererConfig::default(),
            storage: StorageConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
