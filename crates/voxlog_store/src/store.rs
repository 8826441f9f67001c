use crate::naming::is_allowed;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use voxlog_core::Sentiment;

/// The two public folders artifacts live in.
///
/// URL segments match the on-disk defaults (`uploads`, `tts`); the actual
/// directories are configurable and may live elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Folder {
    /// Browser recordings, their transcripts, and their sentiment summaries.
    Recordings,
    /// Typed text, its sentiment summary, and the synthesized audio.
    Synthesized,
}

impl Folder {
    /// Public URL segment for this folder.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Recordings => "uploads",
            Self::Synthesized => "tts",
        }
    }

    /// Parse a URL segment back into a folder. Anything else is rejected.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "uploads" => Some(Self::Recordings),
            "tts" => Some(Self::Synthesized),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown folder: {0}")]
    UnknownFolder(String),
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
}

/// Flat-file store over the two artifact folders.
#[derive(Debug, Clone)]
pub struct Store {
    recordings_dir: PathBuf,
    synthesized_dir: PathBuf,
}

impl Store {
    pub fn new(recordings_dir: impl Into<PathBuf>, synthesized_dir: impl Into<PathBuf>) -> Self {
        Self {
            recordings_dir: recordings_dir.into(),
            synthesized_dir: synthesized_dir.into(),
        }
    }

    /// Create both folders if they don't exist yet. Called once at startup.
    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.recordings_dir, &self.synthesized_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create folder {}", dir.display()))?;
        }
        Ok(())
    }

    fn dir(&self, folder: Folder) -> &Path {
        match folder {
            Folder::Recordings => &self.recordings_dir,
            Folder::Synthesized => &self.synthesized_dir,
        }
    }

    /// Resolve a public `(folder, filename)` pair to a disk path.
    ///
    /// Rejects unknown folder segments and any filename that could escape
    /// the folder (path separators, parent components).
    pub fn resolve(&self, folder_segment: &str, filename: &str) -> Result<PathBuf, StoreError> {
        let folder = Folder::from_segment(folder_segment)
            .ok_or_else(|| StoreError::UnknownFolder(folder_segment.to_string()))?;
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return Err(StoreError::InvalidFilename(filename.to_string()));
        }
        Ok(self.dir(folder).join(filename))
    }

    /// Browsable recordings in a folder, newest first.
    ///
    /// A folder that doesn't exist (yet) lists as empty rather than erroring.
    pub async fn list(&self, folder: Folder) -> Result<Vec<String>> {
        let dir = self.dir(folder);
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(e) => e,
            Err(_) => return Ok(Vec::new()),
        };
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if is_allowed(name) {
                    files.push(name.to_string());
                }
            }
        }
        files.sort_unstable_by(|a, b| b.cmp(a));
        Ok(files)
    }

    /// Save an uploaded recording as `<stem>.wav`. Returns the filename.
    pub async fn save_recording(&self, stem: &str, bytes: &[u8]) -> Result<String> {
        let filename = format!("{stem}.wav");
        self.write(Folder::Recordings, &filename, bytes).await?;
        Ok(filename)
    }

    /// Save a transcript next to its recording as `<recording>.txt`.
    pub async fn save_transcript(&self, recording: &str, transcript: &str) -> Result<String> {
        let filename = format!("{recording}.txt");
        self.write(Folder::Recordings, &filename, transcript.as_bytes())
            .await?;
        Ok(filename)
    }

    /// Save the sentiment summary as `<base>_sentiment.txt` in `folder`.
    ///
    /// `base` is the recording filename for uploads and the bare stem for
    /// synthesized text.
    pub async fn save_sentiment_summary(
        &self,
        folder: Folder,
        base: &str,
        original_text: &str,
        sentiment: &Sentiment,
    ) -> Result<String> {
        let filename = format!("{base}_sentiment.txt");
        let body = sentiment_report(original_text, sentiment);
        self.write(folder, &filename, body.as_bytes()).await?;
        Ok(filename)
    }

    /// Save typed text as `<stem>.txt` in the synthesized folder.
    pub async fn save_text(&self, stem: &str, text: &str) -> Result<String> {
        let filename = format!("{stem}.txt");
        self.write(Folder::Synthesized, &filename, text.as_bytes())
            .await?;
        Ok(filename)
    }

    /// Save synthesized audio as `<stem>.wav` in the synthesized folder.
    pub async fn save_synthesized(&self, stem: &str, bytes: &[u8]) -> Result<String> {
        let filename = format!("{stem}.wav");
        self.write(Folder::Synthesized, &filename, bytes).await?;
        Ok(filename)
    }

    async fn write(&self, folder: Folder, filename: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir(folder).join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Human-readable sentiment summary stored beside the text it describes.
fn sentiment_report(original_text: &str, sentiment: &Sentiment) -> String {
    format!(
        "Original Text:\n{}\n\nSentiment Score: {}\nSentiment Magnitude: {}\nSentiment Label: {}\n",
        original_text, sentiment.score, sentiment.magnitude, sentiment.label
    )
}
