use crate::engines::SentimentAnalyzer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Scores strictly above this are Positive
pub const POSITIVE_THRESHOLD: f32 = 0.25;

/// Scores strictly below this are Negative
pub const NEGATIVE_THRESHOLD: f32 = -0.25;

/// Categorical sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Map an engine score to a label. Both thresholds are exclusive; NaN is Neutral.
    pub fn from_score(score: f32) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score `text` with the sentiment engine and label it
pub async fn analyze(analyzer: &dyn SentimentAnalyzer, text: &str) -> Result<Sentiment> {
    let score = analyzer
        .score(text)
        .await
        .context("Sentiment analysis failed")?;

    let sentiment = Sentiment::from_score(score);
    debug!("Sentiment score {:.3} -> {}", score, sentiment);

    Ok(sentiment)
}

/// Sentiment as reported to clients: a label, or the reason there is none
#[derive(Debug, Clone, PartialEq)]
pub enum SentimentOutcome {
    Label(Sentiment),
    Unavailable(String),
}

impl SentimentOutcome {
    pub fn label(&self) -> Option<Sentiment> {
        match self {
            SentimentOutcome::Label(s) => Some(*s),
            SentimentOutcome::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SentimentOutcome::Label(_) => None,
            SentimentOutcome::Unavailable(reason) => Some(reason),
        }
    }
}

impl From<Result<Sentiment>> for SentimentOutcome {
    fn from(result: Result<Sentiment>) -> Self {
        match result {
            Ok(s) => SentimentOutcome::Label(s),
            Err(e) => SentimentOutcome::Unavailable(format!("{:#}", e)),
        }
    }
}

impl fmt::Display for SentimentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentOutcome::Label(s) => write!(f, "{}", s),
            SentimentOutcome::Unavailable(reason) => write!(f, "Unavailable ({})", reason),
        }
    }
}
