use super::types::{Document, DocumentStore, StoreError, UpdateOutcome, ID_FIELD};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process document store.
///
/// Documents are kept per collection in insertion order, which is what
/// `find_many` returns. Update results follow MongoDB's `$set` accounting:
/// a document counts as modified only if at least one field actually changed.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn document_id(document: &Document) -> Option<&str> {
        document.get(ID_FIELD).and_then(|v| v.as_str())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let id = Self::document_id(&document)
            .ok_or_else(|| StoreError::MissingId(collection.to_string()))?
            .to_string();

        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        if documents
            .iter()
            .any(|d| Self::document_id(d) == Some(id.as_str()))
        {
            return Err(StoreError::DuplicateKey {
                collection: collection.to_string(),
                id,
            });
        }

        debug!("Inserted document {} into {}", id, collection);
        documents.push(document);
        Ok(id)
    }

    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|d| Self::document_id(d) == Some(id))
                .cloned()
        }))
    }

    async fn find_many(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|documents| documents.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| Self::document_id(d) == Some(id)))
        else {
            return Ok(UpdateOutcome::default());
        };

        let mut changed = false;
        for (key, value) in fields {
            if document.get(&key) != Some(&value) {
                document.insert(key, value);
                changed = true;
            }
        }

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(changed),
        })
    }

    async fn delete_one(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match documents
            .iter()
            .position(|d| Self::document_id(d) == Some(id))
        {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
