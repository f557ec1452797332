use super::error::ApiError;
use super::state::AppState;
use crate::sentiment::Sentiment;
use axum::{
    extract::{
        multipart::{Multipart, MultipartError, MultipartRejection},
        rejection::JsonRejection,
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Multipart field carrying the recorded audio
pub const AUDIO_FIELD: &str = "audio";

pub const NO_TEXT: &str = "No text provided";
pub const NO_AUDIO: &str = "No audio file provided";
pub const EMPTY_AUDIO: &str = "Audio file is empty";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    /// Text to speak; required and non-empty
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesisResponse {
    /// `data:audio/mp3;base64,...`
    pub audio: String,
    /// `null` when the sentiment engine failed
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_error: Option<String>,
    pub text_file: String,
    pub audio_file: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub transcript: String,
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_error: Option<String>,
    pub text_file: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /text-to-speech
/// Synthesize MP3 audio for `text` and label its sentiment
pub async fn text_to_speech(
    State(state): State<AppState>,
    payload: Result<Json<SynthesisRequest>, JsonRejection>,
) -> Result<Json<SynthesisResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!("Rejected text-to-speech body: {}", e.body_text());
        ApiError::bad_request(e.body_text())
    })?;

    let text = match req.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ApiError::bad_request(NO_TEXT)),
    };

    let outcome = state.service.synthesize(&text).await?;

    info!("text-to-speech complete: {}", outcome.id);

    Ok(Json(SynthesisResponse {
        audio: audio_data_uri(&outcome.audio),
        sentiment: outcome.sentiment.label(),
        sentiment_error: outcome.sentiment.error().map(str::to_string),
        text_file: outcome.text_file.retrieval_path(),
        audio_file: outcome.audio_file.retrieval_path(),
    }))
}

/// POST /speech-to-text
/// Transcribe the multipart `audio` field and label the transcript's sentiment
pub async fn speech_to_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    // Not a multipart upload at all, so there is no audio field
    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected speech-to-text body: {}", e.body_text());
        ApiError::bad_request(NO_AUDIO)
    })?;

    let mut audio = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() == Some(AUDIO_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(multipart_error)?;
            audio = Some(bytes);
            break;
        }
    }

    let audio = audio.ok_or_else(|| ApiError::bad_request(NO_AUDIO))?;
    if audio.is_empty() {
        return Err(ApiError::bad_request(EMPTY_AUDIO));
    }

    let outcome = state.service.transcribe(&audio).await?;

    info!("speech-to-text complete: {}", outcome.id);

    Ok(Json(TranscriptionResponse {
        transcript: outcome.transcript,
        sentiment: outcome.sentiment.label(),
        sentiment_error: outcome.sentiment.error().map(str::to_string),
        text_file: outcome.text_file.retrieval_path(),
    }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn multipart_error(err: MultipartError) -> ApiError {
    warn!("Failed to read speech-to-text upload: {}", err.body_text());
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::bad_request(err.body_text())
    }
}

fn audio_data_uri(audio: &[u8]) -> String {
    format!(
        "data:audio/mp3;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(audio)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_data_uri() {
        assert_eq!(audio_data_uri(b"ID3"), "data:audio/mp3;base64,SUQz");
        assert_eq!(audio_data_uri(&[]), "data:audio/mp3;base64,");
    }
}
