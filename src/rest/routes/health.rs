use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::AppContext;

/// Health probe: one trivial read against the store.
pub async fn health(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let uptime = ctx.started_at.elapsed().as_secs();
    match ctx.storage.health_check().await {
        Ok(status) => Ok(Json(json!({
            "status": status,
            "database": "connected",
            "timestamp": Utc::now().to_rfc3339(),
            "uptime_secs": uptime,
            "version": env!("CARGO_PKG_VERSION"),
        }))),
        Err(e) => {
            error!(err = %e, "Health check failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected",
                    "error": "Health check failed",
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            ))
        }
    }
}
