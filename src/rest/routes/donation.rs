use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::donation::DonationFormData;
use crate::rest::{client_ip, error::ApiError};
use crate::AppContext;

/// Static donor portal blurb.
pub async fn donate_info() -> Json<Value> {
    Json(json!({
        "message": "FoodShare AI Donation Portal",
        "description": "Connecting surplus food with those in need",
        "weekly_distribution": "2,000,000 lbs",
        "ai_chatbot_url": "/ai-chat",
        "safety_guidelines": "AI will guide you through food safety requirements",
    }))
}

#[derive(Deserialize)]
pub struct DonateIntentRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

pub async fn donate_intent(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<DonateIntentRequest>,
) -> Result<Json<Value>, ApiError> {
    let ip = client_ip(&headers);
    let reply = ctx
        .donations
        .record_intent(body.user_id, ip.as_deref())
        .await
        .map_err(|e| ApiError::internal("Failed to process donation", e))?;
    Ok(Json(reply))
}

pub async fn submit_donation_form(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<DonationFormData>,
) -> Result<Json<Value>, ApiError> {
    let mut reply = ctx
        .donations
        .submit_form(body)
        .await
        .map_err(|e| ApiError::internal("Failed to submit donation form", e))?;
    if let Some(obj) = reply.as_object_mut() {
        obj.insert(
            "message".to_string(),
            json!("Donation form submitted successfully"),
        );
    }
    Ok(Json(reply))
}

#[derive(Deserialize)]
pub struct DonationQuery {
    #[serde(default)]
    pub donation_id: Option<String>,
}

pub async fn list_donations(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<DonationQuery>,
) -> Result<Json<Value>, ApiError> {
    let reply = ctx
        .donations
        .donations(query.donation_id.as_deref())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch donations", e))?;
    Ok(Json(reply))
}
