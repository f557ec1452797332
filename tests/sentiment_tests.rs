// Sentiment labelling: score thresholds and engine error handling

mod common;

use anyhow::Result;
use common::FakeSentiment;
use speech_gateway::sentiment::{analyze, Sentiment};
use std::sync::atomic::AtomicUsize;

#[test]
fn test_score_thresholds() {
    assert_eq!(Sentiment::from_score(0.5), Sentiment::Positive);
    assert_eq!(Sentiment::from_score(-0.5), Sentiment::Negative);
    assert_eq!(Sentiment::from_score(0.0), Sentiment::Neutral);
}

#[test]
fn test_score_boundaries_are_exclusive() {
    assert_eq!(Sentiment::from_score(0.25), Sentiment::Neutral);
    assert_eq!(Sentiment::from_score(-0.25), Sentiment::Neutral);
    assert_eq!(Sentiment::from_score(0.2501), Sentiment::Positive);
    assert_eq!(Sentiment::from_score(-0.2501), Sentiment::Negative);
}

#[test]
fn test_score_extremes() {
    assert_eq!(Sentiment::from_score(1.0), Sentiment::Positive);
    assert_eq!(Sentiment::from_score(-1.0), Sentiment::Negative);
    assert_eq!(Sentiment::from_score(f32::NAN), Sentiment::Neutral);
}

#[test]
fn test_label_serialization() -> Result<()> {
    assert_eq!(serde_json::to_string(&Sentiment::Positive)?, "\"Positive\"");
    assert_eq!(serde_json::to_string(&Sentiment::Neutral)?, "\"Neutral\"");
    assert_eq!(serde_json::to_string(&Sentiment::Negative)?, "\"Negative\"");
    assert_eq!(Sentiment::Negative.to_string(), "Negative");
    Ok(())
}

#[tokio::test]
async fn test_analyze_maps_engine_score() -> Result<()> {
    let engine = FakeSentiment {
        score: Some(0.9),
        calls: AtomicUsize::new(0),
    };
    assert_eq!(analyze(&engine, "great").await?, Sentiment::Positive);
    Ok(())
}

#[tokio::test]
async fn test_analyze_propagates_engine_failure() {
    let engine = FakeSentiment {
        score: None,
        calls: AtomicUsize::new(0),
    };

    let err = analyze(&engine, "anything").await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Sentiment analysis failed"));
    assert!(message.contains("language API quota exceeded"));
}
