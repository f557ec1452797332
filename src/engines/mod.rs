//! Capability traits for the three external engines.
//!
//! Handlers never talk to a cloud SDK directly; they receive an [`Engines`]
//! bundle holding thread-safe handles, so tests can swap in fakes.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Language for every synthesis and recognition call
pub const LANGUAGE_CODE: &str = "en-US";

/// Sample rate browsers record WEBM/Opus at
pub const RECOGNITION_SAMPLE_RATE_HZ: u32 = 48_000;

/// Recognition input encoding
pub const RECOGNITION_ENCODING: &str = "WEBM_OPUS";

/// Synthesis voice gender
pub const VOICE_GENDER: &str = "NEUTRAL";

/// Synthesis output encoding
pub const AUDIO_ENCODING: &str = "MP3";

/// One ranked hypothesis for a segment of audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionAlternative {
    pub transcript: String,
    /// Confidence (0.0 to 1.0), if the engine reports one
    pub confidence: Option<f32>,
}

/// Alternatives for one recognized segment, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub alternatives: Vec<RecognitionAlternative>,
}

/// Text to MP3 audio (en-US, neutral voice)
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// WEBM/Opus audio at 48kHz to ranked transcripts (en-US)
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, audio: &[u8]) -> Result<Vec<RecognitionResult>>;
}

/// Plain text to a polarity score, roughly in [-1, 1]
#[async_trait::async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn score(&self, text: &str) -> Result<f32>;
}

/// Engine handles shared by every request
#[derive(Clone)]
pub struct Engines {
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
}

impl Engines {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        recognizer: Arc<dyn SpeechRecognizer>,
        sentiment: Arc<dyn SentimentAnalyzer>,
    ) -> Self {
        Self {
            synthesizer,
            recognizer,
            sentiment,
        }
    }

    /// Use one client for all three capabilities
    pub fn from_client<C>(client: Arc<C>) -> Self
    where
        C: SpeechSynthesizer + SpeechRecognizer + SentimentAnalyzer + 'static,
    {
        Self {
            synthesizer: client.clone(),
            recognizer: client.clone(),
            sentiment: client,
        }
    }
}

/// First alternative of the first result, if any
pub fn best_transcript(results: &[RecognitionResult]) -> Option<&str> {
    results
        .first()
        .and_then(|r| r.alternatives.first())
        .map(|a| a.transcript.as_str())
}
