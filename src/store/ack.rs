//! Acknowledgment contracts returned by write operations.
//!
//! These are the response bodies of the book write routes, so the field names are
//! fixed here rather than taken from whatever a backend reports natively.

use serde::{Deserialize, Serialize};

use super::document::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

impl InsertAck {
    pub fn new(inserted_id: DocumentId) -> Self {
        Self { acknowledged: true, inserted_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<DocumentId>,
    pub upserted_count: u64,
}

impl UpdateAck {
    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn upserted(id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
            upserted_count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }
}
