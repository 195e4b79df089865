use serde_json::Value;

use crate::store::Document;

/// Fields overwritten by a book update; anything else in the payload is dropped
pub const BOOK_FIELDS: [&str; 9] = [
    "book_name",
    "author_name",
    "publisher_name",
    "publication_date",
    "language",
    "genre",
    "number_of_pages",
    "dimensions",
    "price",
];

/// Build the `$set` document for an update. Fields missing from the payload are
/// written as `null` so the stored record always carries the full field list.
pub fn update_fields(payload: &Document) -> Document {
    BOOK_FIELDS
        .iter()
        .map(|field| (field.to_string(), payload.get(*field).cloned().unwrap_or(Value::Null)))
        .collect()
}
