//! Mock providers — deterministic, keyless stand-ins for the hosted APIs.
//!
//! Used when `GOOGLE_API_KEY` is not set and throughout the tests. The
//! sentiment mock is a small keyword counter so the rest of the pipeline
//! still sees plausible scores.

use crate::sentiment::SentimentAnalyzer;
use crate::stt::SpeechToText;
use crate::tts::TextToSpeech;
use anyhow::Result;
use async_trait::async_trait;
use voxlog_core::config::VoiceGender;
use voxlog_core::Sentiment;

// ============================================================================
// Speech-to-Text
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockSpeechToText;

#[async_trait]
impl SpeechToText for MockSpeechToText {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        if audio.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("(mock transcript of a {} byte recording)", audio.len()))
    }

    fn provider_name(&self) -> &'static str {
        "mock-stt"
    }
}

// ============================================================================
// Sentiment
// ============================================================================

const POSITIVE: &[&str] = &[
    "good", "great", "love", "happy", "wonderful", "thanks", "thank you", "excellent",
];

const NEGATIVE: &[&str] = &[
    "bad", "hate", "sad", "terrible", "awful", "angry", "upset", "worst",
];

#[derive(Debug, Clone, Default)]
pub struct MockSentimentAnalyzer;

#[async_trait]
impl SentimentAnalyzer for MockSentimentAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Sentiment> {
        let lower = text.to_lowercase();
        let pos = POSITIVE.iter().filter(|w| lower.contains(*w)).count() as f32;
        let neg = NEGATIVE.iter().filter(|w| lower.contains(*w)).count() as f32;
        let score = (pos - neg) / (pos + neg + 1.0);
        let magnitude = pos + neg;
        Ok(Sentiment::from_scores(score, magnitude))
    }

    fn provider_name(&self) -> &'static str {
        "mock-sentiment"
    }
}

// ============================================================================
// Text-to-Speech
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockTextToSpeech;

#[async_trait]
impl TextToSpeech for MockTextToSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        // 10ms of silence per character, so longer text yields longer audio.
        let samples = (text.chars().count() * 160).max(160);
        Ok(silent_wav(samples as u32))
    }

    fn voice_gender(&self) -> VoiceGender {
        VoiceGender::Neutral
    }

    fn provider_name(&self) -> &'static str {
        "mock-tts"
    }
}

/// A minimal valid LINEAR16 WAV: mono, 16kHz, all-zero samples.
fn silent_wav(num_samples: u32) -> Vec<u8> {
    const SAMPLE_RATE: u32 = 16_000;
    let data_len = num_samples * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxlog_core::SentimentLabel;

    #[tokio::test]
    async fn test_mock_transcribe() {
        let stt = MockSpeechToText;
        let text = stt.transcribe(b"audio bytes").await.unwrap();
        assert!(text.contains("11 byte"));
    }

    #[tokio::test]
    async fn test_mock_transcribe_empty_audio() {
        let stt = MockSpeechToText;
        assert_eq!(stt.transcribe(b"").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_mock_sentiment_positive() {
        let s = MockSentimentAnalyzer.analyze("what a great, wonderful day").await.unwrap();
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(s.score > 0.0);
    }

    #[tokio::test]
    async fn test_mock_sentiment_negative() {
        let s = MockSentimentAnalyzer.analyze("terrible, awful, the worst").await.unwrap();
        assert_eq!(s.label, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn test_mock_sentiment_neutral() {
        let s = MockSentimentAnalyzer.analyze("the meeting is at noon").await.unwrap();
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert_eq!(s.score, 0.0);
    }

    #[tokio::test]
    async fn test_mock_wav_header() {
        let wav = MockTextToSpeech.synthesize("hi").await.unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 2 * 160 * 2);
    }
}
