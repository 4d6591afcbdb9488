/*!
 * Unit tests for configuration loading, saving and validation
 */

use narrimate::app_config::{Config, LogLevel};
use tempfile::TempDir;

fn configured() -> Config {
    let mut config = Config::default();
    config.generation.api_key = "gen-key".to_string();
    config.speech.api_key = "tts-key".to_string();
    config
}

#[test]
fn test_config_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = configured();
    config.log_level = LogLevel::Debug;
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.generation.api_key, "gen-key");
    assert_eq!(loaded.speech.api_key, "tts-key");
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(Config::from_file(dir.path().join("missing.json")).is_err());
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_partial_config_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    std::fs::write(
        &path,
        r#"{"generation": {"api_key": "k"}, "speech": {"api_key": "s"}}"#,
    )
    .unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.generation.model, "gemini-2.0-flash");
    assert_eq!(loaded.speech.voice_id, "21m00Tcm4TlvDq8ikWAM");
    assert_eq!(loaded.renderer.binary, "manim");
    assert_eq!(loaded.renderer.scene_class, "GeneratedScene");
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_validation_requires_both_api_keys() {
    assert!(Config::default().validate().is_err());

    let mut config = configured();
    assert!(config.validate().is_ok());

    config.generation.api_key.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_empty_scene_class() {
    let mut config = configured();
    config.renderer.scene_class.clear();
    assert!(config.validate().is_err());
}
