use super::auth::{ServiceAccountCredentials, ServiceAccountTokenProvider, TokenSource};
use super::messages::*;
use crate::config::{
    Config, DEFAULT_LANGUAGE_ENDPOINT, DEFAULT_STT_ENDPOINT, DEFAULT_TTS_ENDPOINT,
};
use crate::engines::{
    RecognitionAlternative, RecognitionResult, SentimentAnalyzer, SpeechRecognizer,
    SpeechSynthesizer, AUDIO_ENCODING, LANGUAGE_CODE, RECOGNITION_ENCODING,
    RECOGNITION_SAMPLE_RATE_HZ, VOICE_GENDER,
};
use anyhow::{anyhow, Context, Result};
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Base URLs of the three REST services
#[derive(Debug, Clone)]
pub struct GoogleEndpoints {
    pub tts: String,
    pub stt: String,
    pub language: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            tts: DEFAULT_TTS_ENDPOINT.to_string(),
            stt: DEFAULT_STT_ENDPOINT.to_string(),
            language: DEFAULT_LANGUAGE_ENDPOINT.to_string(),
        }
    }
}

impl GoogleEndpoints {
    /// Point all three services at one base URL
    pub fn single(base: &str) -> Self {
        Self {
            tts: base.to_string(),
            stt: base.to_string(),
            language: base.to_string(),
        }
    }
}

/// One client for Text-to-Speech, Speech-to-Text and Natural Language
pub struct GoogleCloudClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
    endpoints: GoogleEndpoints,
}

impl GoogleCloudClient {
    pub fn new(
        http: reqwest::Client,
        tokens: Arc<dyn TokenSource>,
        endpoints: GoogleEndpoints,
    ) -> Self {
        Self {
            http,
            tokens,
            endpoints,
        }
    }

    /// Build a client authenticated with the configured service-account key file
    pub fn from_config(config: &Config) -> Result<Self> {
        let creds = ServiceAccountCredentials::from_file(config.credentials_path()?)?;
        let http = build_http_client(config.request_timeout())?;
        let tokens = ServiceAccountTokenProvider::new(creds, http.clone())?;

        let endpoints = GoogleEndpoints {
            tts: config.google.tts_endpoint.clone(),
            stt: config.google.stt_endpoint.clone(),
            language: config.google.language_endpoint.clone(),
        };

        info!(
            "Google Cloud client ready (tts={}, stt={}, language={})",
            endpoints.tts, endpoints.stt, endpoints.language
        );

        Ok(Self::new(http, Arc::new(tokens), endpoints))
    }

    async fn post_json<Req, Resp>(&self, base: &str, path: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", base.trim_end_matches('/'), path);
        let token = self.tokens.token().await?;

        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(google_error(status, &body));
        }

        response
            .json::<Resp>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

/// Prefer Google's own error message over the raw body
fn google_error(status: reqwest::StatusCode, body: &str) -> anyhow::Error {
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            if envelope.error.status.is_empty() {
                anyhow!("{} {}", envelope.error.code, envelope.error.message)
            } else {
                anyhow!(
                    "{} {}: {}",
                    envelope.error.code,
                    envelope.error.status,
                    envelope.error.message
                )
            }
        }
        _ => anyhow!("Google API returned {}: {}", status, body.trim()),
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for GoogleCloudClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let request = SynthesizeSpeechRequest {
            input: SynthesisInput { text },
            voice: VoiceSelectionParams {
                language_code: LANGUAGE_CODE,
                ssml_gender: VOICE_GENDER,
            },
            audio_config: AudioConfig {
                audio_encoding: AUDIO_ENCODING,
            },
        };

        let response: SynthesizeSpeechResponse = self
            .post_json(&self.endpoints.tts, "/v1/text:synthesize", &request)
            .await?;

        base64::engine::general_purpose::STANDARD
            .decode(response.audio_content.as_bytes())
            .context("Synthesized audio is not valid base64")
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for GoogleCloudClient {
    async fn recognize(&self, audio: &[u8]) -> Result<Vec<RecognitionResult>> {
        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: RECOGNITION_ENCODING,
                sample_rate_hertz: RECOGNITION_SAMPLE_RATE_HZ,
                language_code: LANGUAGE_CODE,
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(audio),
            },
        };

        let response: RecognizeResponse = self
            .post_json(&self.endpoints.stt, "/v1/speech:recognize", &request)
            .await?;

        Ok(response
            .results
            .into_iter()
            .map(|result| RecognitionResult {
                alternatives: result
                    .alternatives
                    .into_iter()
                    .map(|alt| RecognitionAlternative {
                        transcript: alt.transcript,
                        confidence: alt.confidence,
                    })
                    .collect(),
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl SentimentAnalyzer for GoogleCloudClient {
    async fn score(&self, text: &str) -> Result<f32> {
        let request = AnalyzeSentimentRequest {
            document: Document {
                doc_type: "PLAIN_TEXT",
                content: text,
            },
            encoding_type: "UTF8",
        };

        let response: AnalyzeSentimentResponse = self
            .post_json(
                &self.endpoints.language,
                "/v1/documents:analyzeSentiment",
                &request,
            )
            .await?;

        let sentiment = response.document_sentiment;
        debug!(
            "Document sentiment score {:.3}, magnitude {:.3}",
            sentiment.score, sentiment.magnitude
        );

        Ok(sentiment.score)
    }
}
