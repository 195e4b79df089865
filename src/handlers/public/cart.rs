// handlers/public/cart.rs - POST /cart

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde_json::Value;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::handlers::required;
use crate::models::cart::{CartRequest, BOOKS_FIELD};
use crate::store::{Collection, Document, Filter, Update, ID_FIELD};

/// POST /cart - add a book to the cart entry for an email.
///
/// The first add creates the entry with a one-element book list; later adds append
/// to that list. Returns the entry as stored after the write.
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<CartRequest>, JsonRejection>,
) -> ApiResult<Json<Document>> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;
    let book = request.book.ok_or_else(|| ApiError::bad_request("book is required"))?;

    let filter = Filter::eq("email", email.as_str());
    if state.store.find_one(Collection::Cart, &filter).await?.is_none() {
        let mut entry = Document::new();
        entry.insert("email".to_string(), Value::String(email.clone()));
        entry.insert(BOOKS_FIELD.to_string(), Value::Array(vec![book]));

        let ack = state.store.insert_one(Collection::Cart, entry.clone()).await?;
        entry.insert(ID_FIELD.to_string(), ack.inserted_id.as_value());
        tracing::info!("Created cart {} for {}", ack.inserted_id, email);
        return Ok(Json(entry));
    }

    let update = Update::Push {
        field: BOOKS_FIELD.to_string(),
        value: book,
    };
    state.store.update_one(Collection::Cart, &filter, update, false).await?;

    let entry = state
        .store
        .find_one(Collection::Cart, &filter)
        .await?
        .ok_or_else(|| ApiError::internal_server_error("cart entry disappeared during update"))?;
    Ok(Json(entry))
}
