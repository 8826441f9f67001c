//! Hosted-API clients for voxlog.
//!
//! Speech recognition, sentiment classification, and speech synthesis are
//! all delegated to cloud services; this crate owns the provider traits,
//! the Google REST clients, and mock providers for keyless operation.

pub mod mock;
pub mod retry;
pub mod sentiment;
pub mod stt;
pub mod tts;

pub use mock::{MockSentimentAnalyzer, MockSpeechToText, MockTextToSpeech};
pub use sentiment::{GoogleSentimentAnalyzer, SentimentAnalyzer};
pub use stt::{GoogleSpeechToText, SpeechToText};
pub use tts::{GoogleTextToSpeech, TextToSpeech};
