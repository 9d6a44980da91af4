use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// REST-boundary failure. Every service error surfaces as HTTP 500 with a
/// flat `{"error": <message>}` body; the underlying cause goes to the log,
/// not the client.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn internal(public_message: &str, err: anyhow::Error) -> Self {
        error!(err = %err, "{public_message}");
        Self {
            message: public_message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.message })),
        )
            .into_response()
    }
}
