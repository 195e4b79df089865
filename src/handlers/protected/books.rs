// handlers/protected/books.rs - Book write handlers

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query, State},
    response::Json,
};

use crate::app::AppState;
use crate::error::ApiResult;
use crate::handlers::{parse_id, required};
use crate::middleware::AuthUser;
use crate::models::{book, IdQuery};
use crate::store::{Collection, DeleteAck, Document, Filter, InsertAck, Update, UpdateAck};

/// POST /book, POST /books - insert the payload verbatim
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Document>, JsonRejection>,
) -> ApiResult<Json<InsertAck>> {
    let Json(document) = payload?;
    let ack = state.store.insert_one(Collection::Books, document).await?;
    tracing::info!("Book {} created by {:?}", ack.inserted_id, user.email());
    Ok(Json(ack))
}

async fn update_book(
    state: &AppState,
    user: &AuthUser,
    raw_id: Option<String>,
    payload: Result<Json<Document>, JsonRejection>,
) -> ApiResult<Json<UpdateAck>> {
    let id = parse_id(&required(raw_id, "id")?)?;
    let Json(payload) = payload?;

    let update = Update::Set(book::update_fields(&payload));
    let ack = state
        .store
        .update_one(Collection::Books, &Filter::id(id), update, true)
        .await?;
    tracing::info!(
        "Book {} updated by {:?} (matched {}, upserted {:?})",
        id,
        user.email(),
        ack.matched_count,
        ack.upserted_id
    );
    Ok(Json(ack))
}

/// PUT /books/:id - upsert the fixed book field list
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<Document>, JsonRejection>,
) -> ApiResult<Json<UpdateAck>> {
    update_book(&state, &user, Some(id), payload).await
}

/// PUT /books?id=
pub async fn update_by_query(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
    payload: Result<Json<Document>, JsonRejection>,
) -> ApiResult<Json<UpdateAck>> {
    update_book(&state, &user, query.id, payload).await
}

async fn delete_book(state: &AppState, user: &AuthUser, raw_id: Option<String>) -> ApiResult<Json<DeleteAck>> {
    let id = parse_id(&required(raw_id, "id")?)?;
    let ack = state.store.delete_one(Collection::Books, &Filter::id(id)).await?;
    tracing::info!("Book {} delete by {:?} removed {}", id, user.email(), ack.deleted_count);
    Ok(Json(ack))
}

/// DELETE /books/:id - deleting a missing id reports a zero count
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteAck>> {
    delete_book(&state, &user, Some(id)).await
}

/// DELETE /books?id=
pub async fn delete_by_query(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<IdQuery>,
) -> ApiResult<Json<DeleteAck>> {
    delete_book(&state, &user, query.id).await
}
