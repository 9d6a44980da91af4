use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::chat::{demo_guidelines, food_safety_guidelines};
use crate::rest::{client_ip, error::ApiError};
use crate::AppContext;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

pub async fn chat(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
    let ip = client_ip(&headers);
    let reply = ctx
        .chat
        .handle_chat(&body.message, body.session_id, ip.as_deref())
        .await
        .map_err(|e| ApiError::internal("Failed to process chat message", e))?;

    Ok(Json(serde_json::to_value(reply).map_err(|e| {
        ApiError::internal("Failed to process chat message", e.into())
    })?))
}

/// Static guideline list; served in demo mode when no database is configured.
pub async fn guidelines(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let (guidelines, mode) = if ctx.config.is_configured() {
        (food_safety_guidelines(), "live")
    } else {
        (demo_guidelines(), "demo")
    };

    Json(json!({
        "guidelines": guidelines,
        "last_updated": Utc::now().to_rfc3339(),
        "mode": mode,
    }))
}
