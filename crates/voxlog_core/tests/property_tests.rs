//! Property-based tests for voxlog_core.
//!
//! Uses proptest to verify invariants that must hold for ALL possible inputs,
//! not just hand-picked examples.

use proptest::prelude::*;
use voxlog_core::{classify_score, Sentiment, SentimentLabel};

proptest! {
    /// Every finite score maps to exactly one label, and the label agrees
    /// with the threshold definition.
    #[test]
    fn classify_matches_thresholds(score in -1.0f32..=1.0) {
        let label = classify_score(score);
        if score <= -0.25 {
            prop_assert_eq!(label, SentimentLabel::Negative);
        } else if score >= 0.25 {
            prop_assert_eq!(label, SentimentLabel::Positive);
        } else {
            prop_assert_eq!(label, SentimentLabel::Neutral);
        }
    }

    /// Classification never panics, even for scores outside the documented
    /// [-1, 1] range the API promises.
    #[test]
    fn classify_is_total(score in proptest::num::f32::ANY) {
        let _ = classify_score(score);
    }

    /// from_scores always derives the label from the score it stores.
    #[test]
    fn from_scores_label_is_consistent(score in -1.0f32..=1.0, magnitude in 0.0f32..=10.0) {
        let s = Sentiment::from_scores(score, magnitude);
        prop_assert_eq!(s.label, classify_score(s.score));
        prop_assert_eq!(s.magnitude, magnitude);
    }
}
