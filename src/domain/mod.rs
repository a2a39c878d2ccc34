//! Domain layer - Core business logic and entities

pub mod error;
pub mod sentence;
pub mod storage;

pub use error::DomainError;
pub use sentence::{
    ExampleId, ExampleSentence, FuzzyPattern, Ledger, LedgerEntry, LookupResponse, SentenceSource,
    Term,
};
pub use storage::{PatternFilter, Storage, StorageEntity, StorageKey};
