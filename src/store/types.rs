use async_trait::async_trait;
use serde_json::{Map, Value};

/// A stored document: a JSON object keyed by field name
pub type Document = Map<String, Value>;

/// Document key holding the primary key inside a collection
pub const ID_FIELD: &str = "_id";

/// Result of a merge-update against a single document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateOutcome {
    pub fn is_matched(&self) -> bool {
        self.matched_count > 0
    }

    pub fn is_modified(&self) -> bool {
        self.modified_count > 0
    }
}

/// Error types for document store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Duplicate key in collection '{collection}': {id}")]
    DuplicateKey { collection: String, id: String },

    #[error("Document in collection '{0}' has no string _id")]
    MissingId(String),

    #[error("Operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl StoreError {
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::ConnectionError(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerializationError(err.to_string())
    }
}

/// Abstract trait for document database operations.
///
/// Every operation targets exactly one document in one named collection,
/// except `find_many` which reads up to `limit` documents in natural order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Check that the backing database is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    /// Startup connectivity check; may log more detail than `ping`
    async fn check_connection(&self) -> Result<(), StoreError> {
        self.ping().await
    }

    /// Insert a document carrying a string `_id`, returning that id
    async fn insert_one(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Find a single document by `_id`
    async fn find_one(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Read up to `limit` documents in the store's natural order
    async fn find_many(&self, collection: &str, limit: usize) -> Result<Vec<Document>, StoreError>;

    /// Overwrite the given top-level fields of the document with `_id`.
    /// Fields not named in `fields` are left untouched.
    async fn update_one(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Delete the document with `_id`, returning the number of deleted documents
    async fn delete_one(&self, collection: &str, id: &str) -> Result<u64, StoreError>;

    /// Release the underlying connection
    async fn close(&self) {}

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
