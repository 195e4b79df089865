// handlers/public/books.rs - Book read handlers

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiResult;
use crate::handlers::parse_id;
use crate::models::IdQuery;
use crate::store::{Collection, Document, Filter};

/// GET /books - every book, or the single book named by `?id=` (null when absent)
pub async fn list(State(state): State<AppState>, Query(query): Query<IdQuery>) -> ApiResult<Json<Value>> {
    if let Some(raw) = query.id.as_deref().filter(|id| !id.trim().is_empty()) {
        let id = parse_id(raw)?;
        let book = state.store.find_one(Collection::Books, &Filter::id(id)).await?;
        return Ok(Json(book.map(Value::Object).unwrap_or(Value::Null)));
    }

    let books = state.store.find(Collection::Books, &Filter::all()).await?;
    Ok(Json(Value::Array(books.into_iter().map(Value::Object).collect())))
}

/// GET /book/:id - zero or one book, always wrapped in an array
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Vec<Document>>> {
    let id = parse_id(&id)?;
    let books = state.store.find(Collection::Books, &Filter::id(id)).await?;
    Ok(Json(books))
}
