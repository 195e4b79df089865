use serde::Deserialize;
use serde_json::Value;

/// Array field holding the books added to a cart entry
pub const BOOKS_FIELD: &str = "books";

#[derive(Debug, Deserialize)]
pub struct CartRequest {
    pub email: Option<String>,
    pub book: Option<Value>,
}
