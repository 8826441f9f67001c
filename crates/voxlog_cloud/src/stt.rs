//! Speech-to-Text: trait plus the Google Cloud Speech REST client.

use crate::retry::{with_retry, RetryConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;
use voxlog_core::config::{CloudConfig, SpeechConfig};

/// Transcribe recorded audio to text.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe a complete WAV recording.
    ///
    /// An utterance the service could not recognize comes back as an empty
    /// transcript, not an error.
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;

    fn provider_name(&self) -> &'static str;
}

/// Google Cloud Speech-to-Text over the `speech:recognize` REST endpoint.
#[derive(Debug, Clone)]
pub struct GoogleSpeechToText {
    client: Client,
    api_key: String,
    base_url: String,
    language_code: String,
    audio_channel_count: u32,
    retry: RetryConfig,
}

impl GoogleSpeechToText {
    pub fn new(api_key: &str, speech: &SpeechConfig, cloud: &CloudConfig) -> Result<Self> {
        let base_url = env::var("GOOGLE_SPEECH_BASE_URL")
            .unwrap_or_else(|_| "https://speech.googleapis.com".to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cloud.request_timeout_secs))
                .build()?,
            api_key: api_key.to_string(),
            base_url,
            language_code: speech.language_code.clone(),
            audio_channel_count: speech.audio_channel_count,
            retry: RetryConfig::from(cloud),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    #[serde(default)]
    transcript: String,
}

impl RecognizeResponse {
    /// Join the top alternative of each result with newlines.
    fn into_transcript(self) -> String {
        self.results
            .into_iter()
            .filter_map(|r| r.alternatives.into_iter().next())
            .map(|a| a.transcript)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl SpeechToText for GoogleSpeechToText {
    #[tracing::instrument(skip(self, audio), fields(bytes = audio.len()))]
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        let url = format!(
            "{}/v1/speech:recognize?key={}",
            self.base_url, self.api_key
        );
        let payload = json!({
            "config": {
                "languageCode": self.language_code,
                "audioChannelCount": self.audio_channel_count,
            },
            "audio": {
                "content": BASE64.encode(audio),
            },
        });

        let response = with_retry(&self.retry, "Google Speech", || async {
            let resp = self
                .client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .context("Failed to send request to Google Speech")?;
            Ok(resp)
        })
        .await?;

        let parsed: RecognizeResponse = response
            .json()
            .await
            .context("Failed to parse Google Speech response")?;
        let transcript = parsed.into_transcript();
        tracing::debug!("Transcript: {} chars", transcript.len());
        Ok(transcript)
    }

    fn provider_name(&self) -> &'static str {
        "google-speech"
    }
}
