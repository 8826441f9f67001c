//! The two upload pipelines.
//!
//! Each pipeline persists its artifacts in the order the browser expects to
//! find them: the raw input first, then the derived files. A cloud failure
//! midway leaves the earlier artifacts on disk; nothing is rolled back.

use crate::server::AppState;
use anyhow::{Context, Result};
use chrono::Local;
use voxlog_store::{timestamp_stem, Folder};

/// Recorded-audio pipeline: save the WAV, transcribe it, write the
/// transcript, then score and summarize its sentiment.
///
/// Returns the recording filename.
pub async fn process_recording(state: &AppState, audio: &[u8]) -> Result<String> {
    let stem = timestamp_stem(Local::now());
    let recording = state
        .store
        .save_recording(&stem, audio)
        .await
        .context("Failed to save recording")?;
    tracing::info!("Saved recording {} ({} bytes)", recording, audio.len());

    let transcript = state
        .stt
        .transcribe(audio)
        .await
        .with_context(|| format!("Transcription failed ({})", state.stt.provider_name()))?;
    state.store.save_transcript(&recording, &transcript).await?;

    let sentiment = state
        .sentiment
        .analyze(&transcript)
        .await
        .with_context(|| format!("Sentiment analysis failed ({})", state.sentiment.provider_name()))?;
    state
        .store
        .save_sentiment_summary(Folder::Recordings, &recording, &transcript, &sentiment)
        .await?;
    tracing::info!(
        "Recording {} transcribed ({} chars, sentiment {})",
        recording,
        transcript.len(),
        sentiment.label
    );
    Ok(recording)
}

/// Typed-text pipeline: save the text, score and summarize its sentiment,
/// then synthesize speech and save the WAV.
///
/// Returns the synthesized audio filename.
pub async fn process_text(state: &AppState, text: &str) -> Result<String> {
    let stem = timestamp_stem(Local::now());
    state
        .store
        .save_text(&stem, text)
        .await
        .context("Failed to save text")?;

    let sentiment = state
        .sentiment
        .analyze(text)
        .await
        .with_context(|| format!("Sentiment analysis failed ({})", state.sentiment.provider_name()))?;
    state
        .store
        .save_sentiment_summary(Folder::Synthesized, &stem, text, &sentiment)
        .await?;

    let audio = state
        .tts
        .synthesize(text)
        .await
        .with_context(|| format!("Synthesis failed ({})", state.tts.provider_name()))?;
    let filename = state.store.save_synthesized(&stem, &audio).await?;
    tracing::info!(
        "Text {} synthesized to {} ({} bytes, sentiment {})",
        stem,
        filename,
        audio.len(),
        sentiment.label
    );
    Ok(filename)
}
