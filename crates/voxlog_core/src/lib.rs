pub mod config;
pub mod sentiment;

pub use config::VoxlogConfig;
pub use sentiment::{classify_score, Sentiment, SentimentLabel};
