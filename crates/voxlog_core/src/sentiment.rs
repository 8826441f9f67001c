//! Sentiment domain types.
//!
//! The scores themselves come from the hosted language API; this module only
//! owns the score→label mapping and the types shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse label derived from the document sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "Negative"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Positive => write!(f, "Positive"),
        }
    }
}

/// Document-level sentiment as reported by the language service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Overall valence in `[-1.0, 1.0]`.
    pub score: f32,
    /// Strength of emotion, `[0.0, +inf)`.
    pub magnitude: f32,
    pub label: SentimentLabel,
}

impl Sentiment {
    /// Build a `Sentiment` from the raw score/magnitude pair, deriving the label.
    pub fn from_scores(score: f32, magnitude: f32) -> Self {
        Self {
            score,
            magnitude,
            label: classify_score(score),
        }
    }
}

/// Map a raw sentiment score onto a label.
///
/// Scores at or below `-0.25` are Negative, at or above `0.25` Positive,
/// everything in between (including NaN) Neutral.
pub fn classify_score(score: f32) -> SentimentLabel {
    if score <= -0.25 {
        SentimentLabel::Negative
    } else if score >= 0.25 {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}
