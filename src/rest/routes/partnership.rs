use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::partnership::{FoodRequestData, PartnerRegistrationData};
use crate::rest::{client_ip, error::ApiError};
use crate::AppContext;

pub async fn overview(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    let reply = ctx
        .partnerships
        .overview()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch partnership data", e))?;
    Ok(Json(reply))
}

pub async fn partners(State(ctx): State<Arc<AppContext>>) -> Result<Json<Value>, ApiError> {
    let reply = ctx
        .partnerships
        .partners()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch partners", e))?;
    Ok(Json(reply))
}

pub async fn register(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<PartnerRegistrationData>,
) -> Result<Json<Value>, ApiError> {
    let mut reply = ctx
        .partnerships
        .register_partner(body)
        .await
        .map_err(|e| ApiError::internal("Failed to register partner", e))?;
    if let Some(obj) = reply.as_object_mut() {
        obj.insert(
            "message".to_string(),
            json!("Partner registration submitted successfully"),
        );
    }
    Ok(Json(reply))
}

#[derive(Deserialize)]
pub struct PartnerLoginRequest {
    pub email: String,
    // The password field is accepted and ignored, as in the original.
    #[serde(default)]
    #[allow(dead_code)]
    pub password: Option<String>,
}

pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(body): Json<PartnerLoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let ip = client_ip(&headers);
    let reply = ctx
        .partnerships
        .partner_login(&body.email, ip.as_deref())
        .await
        .map_err(|e| ApiError::internal("Failed to process login", e))?;
    Ok(Json(reply))
}

#[derive(Deserialize)]
pub struct FoodRequestQuery {
    #[serde(default)]
    pub partner_id: Option<String>,
}

pub async fn food_requests(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<FoodRequestQuery>,
) -> Result<Json<Value>, ApiError> {
    let reply = ctx
        .partnerships
        .food_requests(query.partner_id.as_deref())
        .await
        .map_err(|e| ApiError::internal("Failed to fetch food requests", e))?;
    Ok(Json(reply))
}

pub async fn create_food_request(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<FoodRequestData>,
) -> Result<Json<Value>, ApiError> {
    let mut reply = ctx
        .partnerships
        .create_food_request(body)
        .await
        .map_err(|e| ApiError::internal("Failed to create food request", e))?;
    if let Some(obj) = reply.as_object_mut() {
        obj.insert(
            "message".to_string(),
            json!("Food request submitted successfully"),
        );
    }
    Ok(Json(reply))
}

pub async fn match_donations(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Value>, ApiError> {
    let reply = ctx
        .partnerships
        .match_donations()
        .await
        .map_err(|e| ApiError::internal("Failed to match donations", e))?;
    Ok(Json(reply))
}
