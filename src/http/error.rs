use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON body of every API failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failure of an API handler
#[derive(Debug)]
pub enum ApiError {
    /// Input rejected before any external call (400)
    BadRequest(String),
    /// Upload over the route's body limit (413)
    PayloadTooLarge(String),
    /// Engine, filesystem or other internal failure (500)
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message) | ApiError::PayloadTooLarge(message) => message,
            ApiError::Internal(err) => {
                error!("Request failed: {:#}", err);
                format!("{:#}", err)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
