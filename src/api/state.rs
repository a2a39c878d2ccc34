//! Application state for shared services

use std::sync::Arc;

use crate::domain::{DomainError, ExampleSentence};
use crate::infrastructure::services::SentenceService;
use crate::infrastructure::storage::SentenceStores;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub sentence_service: Arc<dyn SentenceServiceTrait>,
    pub stores: SentenceStores,
}

impl AppState {
    pub fn new(sentence_service: Arc<dyn SentenceServiceTrait>, stores: SentenceStores) -> Self {
        Self {
            sentence_service,
            stores,
        }
    }
}

/// Trait for sentence lookup operations
#[async_trait::async_trait]
pub trait SentenceServiceTrait: Send + Sync {
    /// Looks up the raw `q` value; write-back continues after this returns
    async fn search(&self, q: Option<&str>) -> Result<Vec<ExampleSentence>, DomainError>;
}

#[async_trait::async_trait]
impl SentenceServiceTrait for SentenceService {
    async fn search(&self, q: Option<&str>) -> Result<Vec<ExampleSentence>, DomainError> {
        // dropping the join handle leaves reconciliation running detached
        SentenceService::search(self, q)
            .await
            .map(|lookup| lookup.examples)
    }
}
