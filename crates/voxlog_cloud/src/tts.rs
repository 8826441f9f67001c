//! Text-to-Speech: trait plus the Google Cloud TTS REST client.

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
use voxlog_core::config::{CloudConfig, SpeechConfig, VoiceGender};

/// Synthesize text into playable audio.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` into LINEAR16 WAV bytes.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;

    fn voice_gender(&self) -> VoiceGender;

    fn provider_name(&self) -> &'static str;
}

/// Google Cloud Text-to-Speech `text:synthesize` client.
#[derive(Debug, Clone)]
pub struct GoogleTextToSpeech {
    client: Client,
    api_key: String,
    base_url: String,
    language_code: String,
    voice_gender: VoiceGender,
    retry: RetryConfig,
}

impl GoogleTextToSpeech {
    pub fn new(api_key: &str, speech: &SpeechConfig, cloud: &CloudConfig) -> Result<Self> {
        let base_url = env::var("GOOGLE_TTS_BASE_URL")
            .unwrap_or_else(|_| "https://texttospeech.googleapis.com".to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cloud.request_timeout_secs))
                .build()?,
            api_key: api_key.to_string(),
            base_url,
            language_code: speech.language_code.clone(),
            voice_gender: speech.voice_gender,
            retry: RetryConfig::from(cloud),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[async_trait]
impl TextToSpeech for GoogleTextToSpeech {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/v1/text:synthesize?key={}",
            self.base_url, self.api_key
        );
        let payload = json!({
            "input": { "text": text },
            "voice": {
                "languageCode": self.language_code,
                "ssmlGender": self.voice_gender.as_api_str(),
            },
            "audioConfig": { "audioEncoding": "LINEAR16" },
        });

        let response = with_retry(&self.retry, "Google TTS", || async {
            let resp = self
                .client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .context("Failed to send request to Google TTS")?;
            Ok(resp)
        })
        .await?;

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .context("Failed to parse Google TTS response")?;
        let audio = BASE64
            .decode(parsed.audio_content.as_bytes())
            .context("Google TTS returned invalid base64 audio")?;
        tracing::debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }

    fn voice_gender(&self) -> VoiceGender {
        self.voice_gender
    }

    fn provider_name(&self) -> &'static str {
        "google-tts"
    }
}
