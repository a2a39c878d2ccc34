//! Storage domain - Generic storage abstraction layer

mod entity;
mod filter;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use filter::{CompiledFilter, PatternFilter};
pub use repository::{BulkWriteResult, Storage};

#[cfg(test)]
pub use repository::mock;
