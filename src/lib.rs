pub mod config;
pub mod engines;
pub mod google;
pub mod http;
pub mod sentiment;
pub mod service;
pub mod storage;

pub use config::Config;
pub use engines::{
    Engines, RecognitionAlternative, RecognitionResult, SentimentAnalyzer, SpeechRecognizer,
    SpeechSynthesizer,
};
pub use google::GoogleCloudClient;
pub use http::{create_router, AppState};
pub use sentiment::{Sentiment, SentimentOutcome};
pub use service::{SpeechService, SynthesisOutcome, TranscriptionOutcome};
pub use storage::{ArtifactId, ArtifactKind, ArtifactStore, RetentionPolicy, StoredArtifact};
