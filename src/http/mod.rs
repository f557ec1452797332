//! HTTP API server
//!
//! - GET / - Browser page for recording and synthesis
//! - POST /text-to-speech - Text to MP3 + sentiment
//! - POST /speech-to-text - WEBM/Opus upload to transcript + sentiment
//! - GET /uploads/:filename - Stored artifacts
//! - GET /health - Health check

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{SynthesisRequest, SynthesisResponse, TranscriptionResponse};
pub use routes::{create_router, MAX_AUDIO_UPLOAD_BYTES};
pub use state::AppState;
