//! Flat-file artifact storage for voxlog.
//!
//! Everything on disk is a timestamp-named file in one of two folders:
//! browser recordings (plus transcript and sentiment summary) and
//! synthesized speech (typed text, sentiment summary, generated audio).
//! There is no index and no lifecycle beyond create-once/read-many.

mod naming;
mod store;

pub use naming::{is_allowed, timestamp_stem};
pub use store::{Folder, Store, StoreError};
