pub mod ack;
pub mod document;
pub mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

pub use ack::{DeleteAck, InsertAck, UpdateAck};
pub use document::{Collection, Document, DocumentId, Filter, Update, ID_FIELD};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::config::{StoreBackend, StoreConfig};

/// Collection-scoped document operations used by the request handlers.
///
/// Implementations own their connection for the lifetime of the process and are
/// shared between requests behind an `Arc`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`, in store order
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// First document matching `filter`
    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError>;

    /// Insert a document; any caller-supplied `_id` is replaced with a generated one
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<InsertAck, StoreError>;

    /// Apply `update` to the first document matching `filter`. With `upsert`, an
    /// unmatched filter inserts the filter's fields with the update applied.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: Update,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError>;

    /// Delete the first document matching `filter`
    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<DeleteAck, StoreError>;

    /// Round-trip to the backend to confirm it is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn DocumentStore>;

/// Open the backend selected by configuration
pub async fn open(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let store = PgStore::connect(config).await?;
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
    }
}
