//! Sentiment analysis: trait plus the Google Natural Language REST client.

use crate::retry::{with_retry, RetryConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;
use voxlog_core::config::CloudConfig;
use voxlog_core::Sentiment;

/// Score a document for sentiment.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Sentiment>;

    fn provider_name(&self) -> &'static str;
}

/// Google Natural Language `documents:analyzeSentiment` client.
#[derive(Debug, Clone)]
pub struct GoogleSentimentAnalyzer {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryConfig,
}

impl GoogleSentimentAnalyzer {
    pub fn new(api_key: &str, cloud: &CloudConfig) -> Result<Self> {
        let base_url = env::var("GOOGLE_LANGUAGE_BASE_URL")
            .unwrap_or_else(|_| "https://language.googleapis.com".to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(cloud.request_timeout_secs))
                .build()?,
            api_key: api_key.to_string(),
            base_url,
            retry: RetryConfig::from(cloud),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeSentimentResponse {
    document_sentiment: DocumentSentiment,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    #[serde(default)]
    score: f32,
    #[serde(default)]
    magnitude: f32,
}

#[async_trait]
impl SentimentAnalyzer for GoogleSentimentAnalyzer {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn analyze(&self, text: &str) -> Result<Sentiment> {
        let url = format!(
            "{}/v1/documents:analyzeSentiment?key={}",
            self.base_url, self.api_key
        );
        let payload = json!({
            "document": {
                "type": "PLAIN_TEXT",
                "content": text,
            },
            "encodingType": "UTF8",
        });

        let response = with_retry(&self.retry, "Google Language", || async {
            let resp = self
                .client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .context("Failed to send request to Google Language")?;
            Ok(resp)
        })
        .await?;

        let parsed: AnalyzeSentimentResponse = response
            .json()
            .await
            .context("Failed to parse Google Language response")?;
        let sentiment = Sentiment::from_scores(
            parsed.document_sentiment.score,
            parsed.document_sentiment.magnitude,
        );
        tracing::debug!(
            "Sentiment: score={} magnitude={} label={}",
            sentiment.score,
            sentiment.magnitude,
            sentiment.label
        );
        Ok(sentiment)
    }

    fn provider_name(&self) -> &'static str {
        "google-language"
    }
}
