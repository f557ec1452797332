use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Text-to-Speech: POST /v1/text:synthesize
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeSpeechRequest<'a> {
    pub input: SynthesisInput<'a>,
    pub voice: VoiceSelectionParams<'a>,
    pub audio_config: AudioConfig<'a>,
}

#[derive(Debug, Serialize)]
pub struct SynthesisInput<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelectionParams<'a> {
    pub language_code: &'a str,
    pub ssml_gender: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig<'a> {
    pub audio_encoding: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeSpeechResponse {
    /// Base64-encoded audio bytes
    #[serde(default)]
    pub audio_content: String,
}

// ---------------------------------------------------------------------------
// Speech-to-Text: POST /v1/speech:recognize
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RecognizeRequest<'a> {
    pub config: RecognitionConfig<'a>,
    pub audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig<'a> {
    pub encoding: &'a str,
    pub sample_rate_hertz: u32,
    pub language_code: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RecognitionAudio {
    /// Base64-encoded audio bytes
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognizeResponse {
    /// Absent when nothing was recognized
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpeechRecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechRecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    pub confidence: Option<f32>,
}

// ---------------------------------------------------------------------------
// Natural Language: POST /v1/documents:analyzeSentiment
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSentimentRequest<'a> {
    pub document: Document<'a>,
    pub encoding_type: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Document<'a> {
    #[serde(rename = "type")]
    pub doc_type: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSentimentResponse {
    pub document_sentiment: DocumentSentiment,
}

#[derive(Debug, Deserialize)]
pub struct DocumentSentiment {
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub magnitude: f32,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// `{"error": {...}}` envelope returned by Google APIs on failure
#[derive(Debug, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleError,
}

#[derive(Debug, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
