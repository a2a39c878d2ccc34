//! Storage infrastructure - Storage implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{
    SentenceStores, StorageConfig, StorageFactory, StorageType, LEDGER_TABLE, SENTENCE_TABLE,
};
pub use in_memory::InMemoryStorage;
pub use postgres::{PostgresConfig, PostgresStorage};
