use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

/// URL prefix artifacts are served back under
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Which pipeline produced an artifact (becomes the filename prefix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    TextToSpeech,
    SpeechToText,
}

impl ArtifactKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::TextToSpeech => "text_to_speech",
            ArtifactKind::SpeechToText => "speech_to_text",
        }
    }
}

/// Random v4 UUID shared by all artifacts of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ArtifactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A file that has been written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Bare filename, e.g. `speech_to_text_<uuid>.txt`
    pub filename: String,
    /// Full path on disk
    pub path: PathBuf,
}

impl StoredArtifact {
    /// Path clients use to fetch this artifact
    pub fn retrieval_path(&self) -> String {
        format!("{}/{}", UPLOADS_ROUTE, self.filename)
    }
}

/// Append-only artifact directory.
///
/// Every write targets a filename derived from a fresh [`ArtifactId`], and
/// files are opened with create-new semantics, so concurrent requests never
/// touch the same file and nothing is ever overwritten.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open the store, creating the directory if it does not exist
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create uploads directory: {}", root.display()))?;

        info!("Artifact store ready at {}", root.display());

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filename(kind: ArtifactKind, id: &ArtifactId, extension: &str) -> String {
        format!("{}_{}.{}", kind.prefix(), id, extension)
    }

    /// Write a UTF-8 text artifact (`.txt`)
    pub async fn write_text(
        &self,
        kind: ArtifactKind,
        id: &ArtifactId,
        contents: &str,
    ) -> Result<StoredArtifact> {
        self.write(Self::filename(kind, id, "txt"), contents.as_bytes())
            .await
    }

    /// Write raw MP3 bytes (`.mp3`)
    pub async fn write_audio(
        &self,
        kind: ArtifactKind,
        id: &ArtifactId,
        bytes: &[u8],
    ) -> Result<StoredArtifact> {
        self.write(Self::filename(kind, id, "mp3"), bytes).await
    }

    async fn write(&self, filename: String, bytes: &[u8]) -> Result<StoredArtifact> {
        let path = self.root.join(&filename);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to create artifact {}", path.display()))?;

        file.write_all(bytes)
            .await
            .with_context(|| format!("Failed to write artifact {}", path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to flush artifact {}", path.display()))?;

        debug!("Wrote artifact {} ({} bytes)", filename, bytes.len());

        Ok(StoredArtifact { filename, path })
    }
}
