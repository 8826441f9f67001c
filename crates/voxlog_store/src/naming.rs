//! File naming rules.
//!
//! Artifacts are keyed by a local-time stem in `%Y%m%d-%I%M%S%p` form
//! (12-hour clock with AM/PM). Listings sort lexicographically on the stem,
//! which with a 12-hour clock is not chronological within a day
//! (`110000AM` sorts after `020000PM`); the stored filenames keep this
//! naming and ordering.

use chrono::{DateTime, Local};

const STEM_FORMAT: &str = "%Y%m%d-%I%M%S%p";

/// Stem for a new artifact created at `now`, e.g. `20260827-023015PM`.
pub fn timestamp_stem(now: DateTime<Local>) -> String {
    now.format(STEM_FORMAT).to_string()
}

/// Whether a stored filename is browsable from the index.
///
/// Only `.wav` recordings are listed; the transcript and sentiment text
/// files ride along under the same stem and are linked from the audio entry.
pub fn is_allowed(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case("wav"),
        None => false,
    }
}
