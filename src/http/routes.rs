use super::handlers;
use super::state::AppState;
use crate::storage::UPLOADS_ROUTE;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Upload cap for recorded audio
pub const MAX_AUDIO_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.service.store().root());

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/text-to-speech", post(handlers::text_to_speech))
        .route(
            "/speech-to-text",
            post(handlers::speech_to_text).layer(DefaultBodyLimit::max(MAX_AUDIO_UPLOAD_BYTES)),
        )
        // Artifacts by exact filename; ServeDir answers 404 for anything missing
        .nest_service(UPLOADS_ROUTE, uploads)
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
