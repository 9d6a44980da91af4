// rest/mod.rs — Public REST API server.
//
// Axum HTTP server exposing the Food Share JSON API under /api/v1:
//   GET       /api/v1/health
//   POST      /api/v1/ai/chat
//   GET       /api/v1/ai/guidelines
//   GET|POST  /api/v1/ai/donation-form
//   GET|POST  /api/v1/donate
//   GET|POST  /api/v1/partner/login
//   GET       /api/v1/partnership/overview
//   GET       /api/v1/partnership/partners
//   POST      /api/v1/partnership/register
//   POST      /api/v1/partnership/login
//   GET|POST  /api/v1/partnership/food-requests
//   GET       /api/v1/partnership/match-donations

pub mod error;
pub mod routes;

use anyhow::Result;
use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::AppContext;

pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let listener = TcpListener::bind(&bind).await?;
    info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/api/v1/health", get(routes::health::health))
        // Chat + guidelines
        .route("/api/v1/ai/chat", post(routes::chat::chat))
        .route("/api/v1/ai/guidelines", get(routes::chat::guidelines))
        // Donations
        .route(
            "/api/v1/ai/donation-form",
            get(routes::donation::list_donations).post(routes::donation::submit_donation_form),
        )
        .route(
            "/api/v1/donate",
            get(routes::donation::donate_info).post(routes::donation::donate_intent),
        )
        // Partner portal (thin attempt logging)
        .route(
            "/api/v1/partner/login",
            get(routes::partner::portal_info).post(routes::partner::log_login_attempt),
        )
        // Partnership management
        .route(
            "/api/v1/partnership/overview",
            get(routes::partnership::overview),
        )
        .route(
            "/api/v1/partnership/partners",
            get(routes::partnership::partners),
        )
        .route(
            "/api/v1/partnership/register",
            post(routes::partnership::register),
        )
        .route(
            "/api/v1/partnership/login",
            post(routes::partnership::login),
        )
        .route(
            "/api/v1/partnership/food-requests",
            get(routes::partnership::food_requests).post(routes::partnership::create_food_request),
        )
        .route(
            "/api/v1/partnership/match-donations",
            get(routes::partnership::match_donations),
        )
        .layer(cors)
        .with_state(ctx)
}

/// First client IP from the proxy headers, if any.
pub(crate) fn client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }
    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
