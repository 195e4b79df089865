// handlers/public/users.rs - User lookup and register-or-login

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::handlers::required;
use crate::models::user::{EmailQuery, RegisterResponse};
use crate::store::{Collection, Document, Filter, ID_FIELD};

async fn find_users(state: &AppState, email: Option<String>) -> ApiResult<Json<Vec<Document>>> {
    let email = required(email, "email")?;
    let users = state.store.find(Collection::Users, &Filter::eq("email", email)).await?;
    Ok(Json(users))
}

/// GET /users?email= - users registered under an email
pub async fn lookup(State(state): State<AppState>, Query(query): Query<EmailQuery>) -> ApiResult<Json<Vec<Document>>> {
    find_users(&state, query.email).await
}

/// GET /users/:email
pub async fn lookup_by_path(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<Json<Vec<Document>>> {
    find_users(&state, Some(email)).await
}

/// POST /users - register on first sight of an email, otherwise a no-op login.
///
/// The email comes from `?email=` or the body's `email` field. An empty body is an
/// empty profile; any other body must be a JSON object. No credentials are checked;
/// the first stored record for an email wins.
pub async fn register_or_login(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
    body: Bytes,
) -> ApiResult<Json<RegisterResponse>> {
    let mut profile = if body.is_empty() {
        Document::new()
    } else {
        let Json(profile) = Json::<Document>::from_bytes(&body)?;
        profile
    };
    let body_email = profile.get("email").and_then(Value::as_str).map(str::to_string);
    let email = required(query.email.or(body_email), "email")?;

    let filter = Filter::eq("email", email.as_str());
    if state.store.find_one(Collection::Users, &filter).await?.is_some() {
        tracing::debug!("Login for existing user {}", email);
        return Ok(Json(RegisterResponse::existing(email)));
    }

    profile.remove(ID_FIELD);
    profile.insert("email".to_string(), Value::String(email.clone()));
    let ack = state.store.insert_one(Collection::Users, profile).await?;
    tracing::info!("Registered user {} as {}", email, ack.inserted_id);

    Ok(Json(RegisterResponse::created(email)))
}
