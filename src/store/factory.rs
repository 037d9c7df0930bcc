use super::memory::MemoryStore;
use super::mongo::{MongoConfig, MongoStore};
use super::types::{DocumentStore, StoreError};
use std::sync::Arc;
use tracing::info;

/// Supported document store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    MongoDb,
    Memory,
}

impl StoreType {
    /// Parse store type from string
    pub fn from_str(s: &str) -> Result<Self, StoreError> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreType::MongoDb),
            "memory" => Ok(StoreType::Memory),
            _ => Err(StoreError::ConfigError(format!(
                "Unsupported STORE_BACKEND: {}. Supported backends: mongodb, memory",
                s
            ))),
        }
    }
}

/// Factory for creating document store clients
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store for the given backend. MongoDB requires connection settings.
    pub async fn create(
        store_type: StoreType,
        mongo: Option<MongoConfig>,
    ) -> Result<Arc<dyn DocumentStore>, StoreError> {
        info!("Creating document store: {:?}", store_type);

        match store_type {
            StoreType::MongoDb => {
                let config = mongo.ok_or_else(|| {
                    StoreError::ConfigError("MongoDB connection settings are missing".to_string())
                })?;
                let store = MongoStore::new(config).await?;
                Ok(Arc::new(store))
            }
            StoreType::Memory => Ok(Arc::new(MemoryStore::new())),
        }
    }
}
