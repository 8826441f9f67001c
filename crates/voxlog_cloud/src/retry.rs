//! Retry with exponential backoff for hosted API calls.
//!
//! Retries transient failures (429, 5xx, 408, network errors). Client errors
//! (400, 401, 403, 404) fail immediately.

use anyhow::Result;
use reqwest::{Response, StatusCode};
use std::time::Duration;
use voxlog_core::config::CloudConfig;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each attempt.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
        }
    }
}

impl From<&CloudConfig> for RetryConfig {
    fn from(cfg: &CloudConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            ..Self::default()
        }
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}

/// Run an HTTP operation until it returns a successful response, a
/// non-retryable status, or the attempt budget runs out.
pub async fn with_retry<F, Fut>(
    config: &RetryConfig,
    service_name: &str,
    operation: F,
) -> Result<Response>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<Response>>,
{
    let mut delay = config.initial_delay;
    let mut last_error = None;

    for attempt in 1..=config.max_attempts {
        match operation().await {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    if attempt > 1 {
                        tracing::info!("{} succeeded on attempt {}", service_name, attempt);
                    }
                    return Ok(response);
                }

                let error_text = response.text().await.unwrap_or_default();
                if !is_retryable_status(status) {
                    anyhow::bail!("{} API error ({}): {}", service_name, status, error_text);
                }

                tracing::warn!(
                    "{} returned {} on attempt {}/{}: {}",
                    service_name,
                    status,
                    attempt,
                    config.max_attempts,
                    error_text.chars().take(200).collect::<String>()
                );
                last_error = Some(format!("{} ({}): {}", service_name, status, error_text));
            }
            Err(e) => {
                tracing::warn!(
                    "{} network error on attempt {}/{}: {}",
                    service_name,
                    attempt,
                    config.max_attempts,
                    e
                );
                last_error = Some(format!("{}: {}", service_name, e));
            }
        }

        if attempt < config.max_attempts {
            let sleep_time = delay + Duration::from_millis(rand_jitter());
            tracing::info!(
                "{} retrying in {:.1}s (attempt {}/{})",
                service_name,
                sleep_time.as_secs_f64(),
                attempt + 1,
                config.max_attempts
            );
            tokio::time::sleep(sleep_time).await;
            delay = Duration::from_secs_f64(
                (delay.as_secs_f64() * config.backoff_factor).min(config.max_delay.as_secs_f64()),
            );
        }
    }

    anyhow::bail!(
        "All {} retry attempts exhausted. Last error: {}",
        config.max_attempts,
        last_error.unwrap_or_else(|| "unknown".to_string())
    )
}

/// 0-500ms jitter derived from the clock. Good enough for request spreading.
fn rand_jitter() -> u64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 500) as u64
}
