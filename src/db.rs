use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::models::Record;
use crate::store::{Document, DocumentStore, StoreError, UpdateOutcome, ID_FIELD};

/// Maximum number of records returned by a list operation
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Field name of the record id on the wire
const RECORD_ID_FIELD: &str = "id";

/// Process-wide handle to the document store, shared by all handlers
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Database { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }

    pub async fn check_connection(&self) -> Result<(), StoreError> {
        self.store.check_connection().await
    }

    pub async fn close(&self) {
        self.store.close().await
    }

    /// Typed access to the collection backing `T`
    pub fn collection<T: Record>(&self) -> Collection<'_, T> {
        Collection {
            store: self.store.as_ref(),
            _record: PhantomData,
        }
    }
}

/// Typed view over one collection.
///
/// Records carry their key as `id`; documents in the store carry it as `_id`.
pub struct Collection<'a, T> {
    store: &'a dyn DocumentStore,
    _record: PhantomData<T>,
}

impl<'a, T: Record> Collection<'a, T> {
    pub async fn insert(&self, record: &T) -> Result<String, StoreError> {
        let document = to_document(record)?;
        self.store.insert_one(T::COLLECTION, document).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        self.store
            .find_one(T::COLLECTION, id)
            .await?
            .map(from_document)
            .transpose()
    }

    pub async fn list(&self, limit: usize) -> Result<Vec<T>, StoreError> {
        self.store
            .find_many(T::COLLECTION, limit)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Merge `fields` into the stored record. The primary key is never rewritten.
    pub async fn update_by_id(
        &self,
        id: &str,
        mut fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        fields.remove(RECORD_ID_FIELD);
        fields.remove(ID_FIELD);
        self.store.update_one(T::COLLECTION, id, fields).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
        self.store.delete_one(T::COLLECTION, id).await
    }
}

fn to_document<T: Record>(record: &T) -> Result<Document, StoreError> {
    let mut document = match serde_json::to_value(record)? {
        Value::Object(document) => document,
        other => {
            return Err(StoreError::SerializationError(format!(
                "{} did not serialize to an object: {}",
                T::KIND,
                other
            )))
        }
    };
    document.remove(RECORD_ID_FIELD);
    document.insert(ID_FIELD.to_string(), Value::String(record.id().to_string()));
    Ok(document)
}

fn from_document<T: Record>(mut document: Document) -> Result<T, StoreError> {
    if let Some(id) = document.remove(ID_FIELD) {
        document.insert(RECORD_ID_FIELD.to_string(), id);
    }
    Ok(serde_json::from_value(Value::Object(document))?)
}
