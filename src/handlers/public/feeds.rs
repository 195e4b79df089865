// handlers/public/feeds.rs - Read-only catalog collections

use axum::{extract::State, response::Json};

use crate::app::AppState;
use crate::error::ApiResult;
use crate::store::{Collection, Document, Filter};

async fn list_collection(state: &AppState, collection: Collection) -> ApiResult<Json<Vec<Document>>> {
    let documents = state.store.find(collection, &Filter::all()).await?;
    tracing::debug!("Listed {} documents from {}", documents.len(), collection);
    Ok(Json(documents))
}

/// GET /news
pub async fn news(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    list_collection(&state, Collection::News).await
}

/// GET /events
pub async fn events(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    list_collection(&state, Collection::Events).await
}

/// GET /members
pub async fn members(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    list_collection(&state, Collection::Members).await
}
