// Fake engines shared by the integration tests.

#![allow(dead_code)]

use anyhow::{bail, Result};
use speech_gateway::{
    ArtifactStore, Engines, RecognitionAlternative, RecognitionResult, SentimentAnalyzer,
    SpeechRecognizer, SpeechService, SpeechSynthesizer,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const FAKE_MP3: &[u8] = b"ID3\x04\x00fake-mp3-frames";

pub struct FakeSynthesizer {
    pub fail: bool,
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("synthesis backend unavailable");
        }
        Ok(FAKE_MP3.to_vec())
    }
}

pub struct FakeRecognizer {
    pub transcripts: Vec<String>,
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl SpeechRecognizer for FakeRecognizer {
    async fn recognize(&self, _audio: &[u8]) -> Result<Vec<RecognitionResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.transcripts.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![RecognitionResult {
            alternatives: self
                .transcripts
                .iter()
                .map(|t| RecognitionAlternative {
                    transcript: t.clone(),
                    confidence: Some(0.9),
                })
                .collect(),
        }])
    }
}

pub struct FakeSentiment {
    /// `None` makes every call fail
    pub score: Option<f32>,
    pub calls: AtomicUsize,
}

#[async_trait::async_trait]
impl SentimentAnalyzer for FakeSentiment {
    async fn score(&self, _text: &str) -> Result<f32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.score {
            Some(score) => Ok(score),
            None => bail!("language API quota exceeded"),
        }
    }
}

pub struct Fakes {
    pub synthesizer: Arc<FakeSynthesizer>,
    pub recognizer: Arc<FakeRecognizer>,
    pub sentiment: Arc<FakeSentiment>,
}

impl Fakes {
    pub fn new(score: Option<f32>, transcripts: &[&str]) -> Self {
        Self {
            synthesizer: Arc::new(FakeSynthesizer {
                fail: false,
                calls: AtomicUsize::new(0),
            }),
            recognizer: Arc::new(FakeRecognizer {
                transcripts: transcripts.iter().map(|t| t.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }),
            sentiment: Arc::new(FakeSentiment {
                score,
                calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn failing_synthesis(mut self) -> Self {
        self.synthesizer = Arc::new(FakeSynthesizer {
            fail: true,
            calls: AtomicUsize::new(0),
        });
        self
    }

    pub fn engines(&self) -> Engines {
        Engines::new(
            self.synthesizer.clone(),
            self.recognizer.clone(),
            self.sentiment.clone(),
        )
    }

    pub fn service(&self, store: ArtifactStore) -> SpeechService {
        SpeechService::new(self.engines(), store)
    }
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
