use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::rest::{client_ip, error::ApiError};
use crate::AppContext;

/// Static partner portal blurb.
pub async fn portal_info() -> Json<Value> {
    Json(json!({
        "message": "FoodShare Partner Portal",
        "description": "Building partnerships for food security across India",
        "partnership_site_url": "/partnership",
        "features": [
            "NGO partner registration",
            "Food request management",
            "Donation matching system",
            "Impact tracking",
        ],
    }))
}

#[derive(Deserialize)]
pub struct LoginAttemptRequest {
    pub email: String,
}

/// Append a login-attempt audit row and hand the caller off to the
/// partnership portal. No credential check happens here.
pub async fn log_login_attempt(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<LoginAttemptRequest>,
) -> Result<Json<Value>, ApiError> {
    let ip = client_ip(&headers);
    ctx.storage
        .log_partner_login(&body.email, "attempted", ip.as_deref())
        .await
        .map_err(|e| ApiError::internal("Failed to process partner login", e))?;

    Ok(Json(json!({
        "success": true,
        "message": "Partner login processed",
        "partnership_site_url": "/partnership",
        "partner_id": Uuid::new_v4().to_string(),
        "next_step": "Redirecting to partnership management portal",
    })))
}
