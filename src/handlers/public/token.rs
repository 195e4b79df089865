// handlers/public/token.rs - POST /jwt

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::models::TokenResponse;

/// POST /jwt - sign the posted object (normally a user record) into a bearer token
pub async fn issue(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(payload) = payload?;
    let token = state.keys.issue(payload)?;
    Ok(Json(TokenResponse::success(token)))
}
