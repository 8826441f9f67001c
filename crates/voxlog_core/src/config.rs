use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VoxlogConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    pub cloud: CloudConfig,
}

impl VoxlogConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: VoxlogConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist, return defaults with
    /// env overrides applied.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("VOXLOG_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = std::env::var("VOXLOG_PORT") {
            if let Ok(n) = v.parse() {
                self.server.port = n;
            }
        }
        if let Ok(v) = std::env::var("VOXLOG_RECORDINGS_DIR") {
            self.storage.recordings_dir = v;
        }
        if let Ok(v) = std::env::var("VOXLOG_SYNTHESIZED_DIR") {
            self.storage.synthesized_dir = v;
        }
        if let Ok(v) = std::env::var("VOXLOG_LANGUAGE_CODE") {
            self.speech.language_code = v;
        }
        if let Ok(v) = std::env::var("VOXLOG_REQUEST_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.cloud.request_timeout_secs = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Folder for browser recordings plus their transcript/sentiment files.
    pub recordings_dir: String,
    /// Folder for typed text, its sentiment file, and synthesized audio.
    pub synthesized_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            recordings_dir: "uploads".to_string(),
            synthesized_dir: "tts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub language_code: String,
    /// Channel count the recognizer is told to expect. Browser recordings
    /// are mono.
    pub audio_channel_count: u32,
    pub voice_gender: VoiceGender,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            audio_channel_count: 1,
            voice_gender: VoiceGender::Neutral,
        }
    }
}

/// SSML voice gender passed to the synthesis API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceGender {
    #[default]
    Neutral,
    Male,
    Female,
}

impl VoiceGender {
    /// Wire value expected by the synthesis API.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Neutral => "NEUTRAL",
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }
}

impl fmt::Display for VoiceGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    /// Per-request timeout for all hosted API calls.
    pub request_timeout_secs: u64,
    /// Maximum attempts per call (including the first).
    pub max_attempts: u32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            max_attempts: 3,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = VoxlogConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.storage.recordings_dir, "uploads");
        assert_eq!(cfg.storage.synthesized_dir, "tts");
        assert_eq!(cfg.speech.language_code, "en-US");
        assert_eq!(cfg.speech.audio_channel_count, 1);
        assert_eq!(cfg.speech.voice_gender, VoiceGender::Neutral);
        assert_eq!(cfg.cloud.max_attempts, 3);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[server]
port = 8080
"#;
        let cfg: VoxlogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.server.port, 8080);
        // Defaults for unspecified fields
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.storage.recordings_dir, "uploads");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[server]
host = "0.0.0.0"
port = 9000

[storage]
recordings_dir = "data/uploads"
synthesized_dir = "data/tts"

[speech]
language_code = "en-GB"
audio_channel_count = 2
voice_gender = "female"

[cloud]
request_timeout_secs = 30
max_attempts = 5
"#;
        let cfg: VoxlogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.recordings_dir, "data/uploads");
        assert_eq!(cfg.speech.language_code, "en-GB");
        assert_eq!(cfg.speech.audio_channel_count, 2);
        assert_eq!(cfg.speech.voice_gender, VoiceGender::Female);
        assert_eq!(cfg.cloud.request_timeout_secs, 30);
        assert_eq!(cfg.cloud.max_attempts, 5);
    }

    #[test]
    fn test_voice_gender_wire_values() {
        assert_eq!(VoiceGender::Neutral.as_api_str(), "NEUTRAL");
        assert_eq!(VoiceGender::Male.as_api_str(), "MALE");
        assert_eq!(VoiceGender::Female.as_api_str(), "FEMALE");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let cfg = VoxlogConfig::load_or_default("/nonexistent/voxlog.toml");
        assert_eq!(cfg.server.port, 5000);
    }
}
