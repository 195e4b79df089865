use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    Collection, DeleteAck, Document, DocumentId, DocumentStore, Filter, InsertAck, StoreError, Update, UpdateAck,
    ID_FIELD,
};

/// In-process store keeping each collection in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<InsertAck, StoreError> {
        let id = DocumentId::new();
        document.insert(ID_FIELD.to_string(), id.as_value());

        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(document);
        Ok(InsertAck::new(id))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: Update,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if let Some(existing) = docs.iter_mut().find(|d| filter.matches(d)) {
            let modified = update.apply(existing);
            return Ok(UpdateAck::matched(modified));
        }

        if !upsert {
            return Ok(UpdateAck::unmatched());
        }

        let mut document = filter.seed();
        let id = match document.get(ID_FIELD).and_then(|v| v.as_str()) {
            Some(raw) => DocumentId::parse(raw)?,
            None => DocumentId::new(),
        };
        document.insert(ID_FIELD.to_string(), id.as_value());
        update.apply(&mut document);
        docs.push(document);
        Ok(UpdateAck::upserted(id))
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<DeleteAck, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(DeleteAck::new(0));
        };

        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                Ok(DeleteAck::new(1))
            }
            None => Ok(DeleteAck::new(0)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
