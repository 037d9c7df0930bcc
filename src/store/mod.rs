pub mod factory;
pub mod memory;
pub mod mongo;
pub mod types;

pub use factory::{StoreFactory, StoreType};
pub use memory::MemoryStore;
pub use mongo::MongoConfig;
pub use types::{Document, DocumentStore, StoreError, UpdateOutcome, ID_FIELD};
