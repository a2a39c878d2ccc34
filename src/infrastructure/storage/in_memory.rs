//! In-memory storage implementation

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{PatternFilter, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<BTreeMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates storage pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let map = entities
            .into_iter()
            .map(|entity| (entity.key().as_key().into_owned(), entity))
            .collect();

        Self {
            entities: RwLock::new(map),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.get(&*key.as_key()).cloned())
    }

    async fn find(
        &self,
        filter: &PatternFilter,
        limit: Option<usize>,
    ) -> Result<Vec<E>, DomainError> {
        let compiled = filter.compile()?;
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities
            .values()
            .filter(|entity| compiled.matches(*entity))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn replace(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_key().into_owned();
        let mut entities = self.entities.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentence::{ExampleId, ExampleSentence, FuzzyPattern, Term};

    fn sentence(id: u64, text: &str) -> ExampleSentence {
        ExampleSentence::new(id, text)
    }

    fn fuzzy(term: &str) -> PatternFilter {
        FuzzyPattern::from_term(&Term::new(term).unwrap()).to_filter(ExampleSentence::TEXT_FIELD)
    }

    #[tokio::test]
    async fn test_replace_and_get() {
        let storage: InMemoryStorage<ExampleSentence> = InMemoryStorage::new();
        let record = sentence(1, "猫がいる");

        storage.replace(record.clone()).await.unwrap();

        let result = storage.get(&ExampleId(1)).await.unwrap();
        assert_eq!(result, Some(record));
    }

    #[tokio::test]
    async fn test_replace_same_id_keeps_one_record_with_second_content() {
        let storage: InMemoryStorage<ExampleSentence> = InMemoryStorage::new();

        storage
            .replace(sentence(7, "猫がいる").with_translation("There is a cat"))
            .await
            .unwrap();
        storage
            .replace(sentence(7, "猫がいた").with_translation("There was a cat"))
            .await
            .unwrap();

        assert_eq!(storage.count().await.unwrap(), 1);
        let stored = storage.get(&ExampleId(7)).await.unwrap().unwrap();
        assert_eq!(stored.sentence, "猫がいた");
        assert_eq!(stored.translation, "There was a cat");
    }

    #[tokio::test]
    async fn test_get_missing() {
        let storage: InMemoryStorage<ExampleSentence> = InMemoryStorage::new();
        assert!(storage.get(&ExampleId(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_with_fuzzy_filter() {
        let storage = InMemoryStorage::with_entities(vec![
            sentence(1, "ご飯を食べた"),
            sentence(2, "食べない"),
            sentence(3, "水を飲む"),
        ]);

        let found = storage.find(&fuzzy("食べる"), None).await.unwrap();
        let ids: Vec<u64> = found.iter().map(|s| s.id.0).collect();

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_find_respects_limit() {
        let storage = InMemoryStorage::with_entities(
            (1..=10).map(|id| sentence(id, "猫がいる")).collect(),
        );

        let found = storage.find(&fuzzy("猫"), Some(3)).await.unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn test_bulk_replace() {
        let storage: InMemoryStorage<ExampleSentence> = InMemoryStorage::new();

        let result = storage
            .bulk_replace(vec![sentence(1, "一"), sentence(2, "二"), sentence(1, "三")])
            .await;

        assert_eq!(result.written, 3);
        assert!(result.is_complete());
        assert_eq!(storage.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_ping() {
        let storage: InMemoryStorage<ExampleSentence> = InMemoryStorage::new();
        assert!(storage.ping().await.is_ok());
    }
}
