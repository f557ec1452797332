//! Request pipelines behind the two API endpoints.
//!
//! Each call is one linear run: external engines, then a fresh artifact ID,
//! then the artifacts for that ID. Nothing is persisted if an engine call
//! other than sentiment fails.

use crate::engines::{best_transcript, Engines};
use crate::sentiment::{self, SentimentOutcome};
use crate::storage::{ArtifactId, ArtifactKind, ArtifactStore, StoredArtifact};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Transcript used when the recognizer returns no results
pub const NO_TRANSCRIPTION: &str = "No transcription available";

/// Result of a text-to-speech run
#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub id: ArtifactId,
    pub audio: Vec<u8>,
    pub sentiment: SentimentOutcome,
    pub text_file: StoredArtifact,
    pub audio_file: StoredArtifact,
}

/// Result of a speech-to-text run
#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub id: ArtifactId,
    pub transcript: String,
    pub sentiment: SentimentOutcome,
    pub text_file: StoredArtifact,
}

pub struct SpeechService {
    engines: Engines,
    store: ArtifactStore,
}

impl SpeechService {
    pub fn new(engines: Engines, store: ArtifactStore) -> Self {
        Self { engines, store }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    async fn sentiment_of(&self, text: &str) -> SentimentOutcome {
        let outcome: SentimentOutcome =
            sentiment::analyze(self.engines.sentiment.as_ref(), text).await.into();

        if let Some(reason) = outcome.error() {
            warn!("Continuing without sentiment: {}", reason);
        }

        outcome
    }

    /// Text to MP3, with sentiment, persisted as a `.txt` and an `.mp3` artifact
    pub async fn synthesize(&self, text: &str) -> Result<SynthesisOutcome> {
        let sentiment = self.sentiment_of(text).await;

        let audio = self
            .engines
            .synthesizer
            .synthesize(text)
            .await
            .context("Speech synthesis failed")?;

        let id = ArtifactId::new();
        let contents = format!("Text: {}\nSentiment: {}\n", text, sentiment);

        let text_file = self
            .store
            .write_text(ArtifactKind::TextToSpeech, &id, &contents)
            .await?;
        let audio_file = self
            .store
            .write_audio(ArtifactKind::TextToSpeech, &id, &audio)
            .await?;

        info!(
            "Synthesized {} chars into {} bytes of audio (artifact {})",
            text.chars().count(),
            audio.len(),
            id
        );

        Ok(SynthesisOutcome {
            id,
            audio,
            sentiment,
            text_file,
            audio_file,
        })
    }

    /// WEBM/Opus audio to transcript, with sentiment, persisted as a `.txt` artifact
    pub async fn transcribe(&self, audio: &[u8]) -> Result<TranscriptionOutcome> {
        let results = self
            .engines
            .recognizer
            .recognize(audio)
            .await
            .context("Speech recognition failed")?;

        let transcript = best_transcript(&results)
            .unwrap_or(NO_TRANSCRIPTION)
            .to_string();

        let sentiment = self.sentiment_of(&transcript).await;

        let id = ArtifactId::new();
        let contents = format!("Transcription: {}\nSentiment: {}\n", transcript, sentiment);

        let text_file = self
            .store
            .write_text(ArtifactKind::SpeechToText, &id, &contents)
            .await?;

        info!(
            "Transcribed {} bytes of audio into {} chars (artifact {})",
            audio.len(),
            transcript.chars().count(),
            id
        );

        Ok(TranscriptionOutcome {
            id,
            transcript,
            sentiment,
            text_file,
        })
    }
}
