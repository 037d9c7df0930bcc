pub mod crawler_data;
pub mod crawler_source;

use serde::{de::DeserializeOwned, Serialize};

/// A top-level record persisted in its own collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Backing collection name
    const COLLECTION: &'static str;

    /// Human readable resource name used in error messages
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn not_found_message(id: &str) -> String {
        format!("{} with ID {} not found", Self::KIND, id)
    }
}

/// Use the caller supplied id unless it is missing or blank
pub(crate) fn supplied_id(id: Option<String>) -> Option<String> {
    id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
}
