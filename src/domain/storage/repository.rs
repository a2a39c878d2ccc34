//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};
use super::filter::PatternFilter;

/// A single entity that could not be written during a bulk write
#[derive(Debug)]
pub struct BulkWriteFailure {
    pub key: String,
    pub error: DomainError,
}

/// Outcome of an unordered bulk write
#[derive(Debug, Default)]
pub struct BulkWriteResult {
    pub written: usize,
    pub failures: Vec<BulkWriteFailure>,
}

impl BulkWriteResult {
    fn from_results(results: Vec<Result<(), BulkWriteFailure>>) -> Self {
        let mut outcome = Self::default();

        for result in results {
            match result {
                Ok(()) => outcome.written += 1,
                Err(failure) => outcome.failures.push(failure),
            }
        }

        outcome
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generic document storage for any entity type
///
/// Mirrors the operations of a document store collection: exact-key point
/// lookup, pattern-filtered scan, and replace-upsert by key (single or bulk).
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its exact key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves entities matching the filter, at most `limit` of them
    async fn find(
        &self,
        filter: &PatternFilter,
        limit: Option<usize>,
    ) -> Result<Vec<E>, DomainError>;

    /// Replaces the entity stored under its key, creating it if absent
    async fn replace(&self, entity: E) -> Result<E, DomainError>;

    /// Replace-upserts every entity independently.
    ///
    /// Writes are unordered and a failed write never prevents the others.
    async fn bulk_replace(&self, entities: Vec<E>) -> BulkWriteResult {
        let writes = entities.into_iter().map(|entity| async move {
            let key = entity.key().as_key().into_owned();
            self.replace(entity)
                .await
                .map(|_| ())
                .map_err(|error| BulkWriteFailure { key, error })
        });

        BulkWriteResult::from_results(futures::future::join_all(writes).await)
    }

    /// Returns the count of entities
    async fn count(&self) -> Result<usize, DomainError>;

    /// Verifies the backend is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        self.count().await.map(|_| ())
    }
}
