// handlers/public/service.rs - Welcome and health endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::app::AppState;

pub const WELCOME: &str = "Welcome to bookshelf project server";

/// GET /
pub async fn root() -> &'static str {
    WELCOME
}

/// GET /health - pings the store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store": "unavailable"
                })),
            )
        }
    }
}
