//! Storage factory for runtime storage selection

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::sentence::{ExampleSentence, LedgerEntry};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Table holding one ledger entry per query term
pub const LEDGER_TABLE: &str = "sentence_log";
/// Table holding one example sentence per upstream id
pub const SENTENCE_TABLE: &str = "sentence";

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Builds a configuration from a backend name and connection settings
    pub fn from_backend(backend: &str, postgres: PostgresConfig) -> Result<Self, DomainError> {
        match StorageType::parse(backend) {
            Some(StorageType::InMemory) => Ok(Self::InMemory),
            Some(StorageType::Postgres) => Ok(Self::Postgres(postgres)),
            None => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                backend
            ))),
        }
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// The two collections the sentence cache works with, sharing one backend
///
/// Created once per process and handed to every consumer; `close` releases
/// the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SentenceStores {
    pub ledger: Arc<dyn Storage<LedgerEntry>>,
    pub sentences: Arc<dyn Storage<ExampleSentence>>,
    pool: Option<PgPool>,
}

impl SentenceStores {
    pub fn new(
        ledger: Arc<dyn Storage<LedgerEntry>>,
        sentences: Arc<dyn Storage<ExampleSentence>>,
    ) -> Self {
        Self {
            ledger,
            sentences,
            pool: None,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStorage::<LedgerEntry>::new()),
            Arc::new(InMemoryStorage::<ExampleSentence>::new()),
        )
    }

    /// Closes the shared connection pool, if any
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("Storage connection pool closed");
        }
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the ledger and sentence stores for the configured backend
    pub async fn create_sentence_stores(
        config: &StorageConfig,
    ) -> Result<SentenceStores, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(SentenceStores::in_memory()),
            StorageConfig::Postgres(pg_config) => {
                info!("Connecting to PostgreSQL...");
                let pool = pg_config.connect().await?;
                info!("PostgreSQL connection established");

                let ledger = PostgresStorage::<LedgerEntry>::new(pool.clone(), LEDGER_TABLE);
                ledger.ensure_table().await?;

                let sentences =
                    PostgresStorage::<ExampleSentence>::new(pool.clone(), SENTENCE_TABLE);
                sentences.ensure_table().await?;

                Ok(SentenceStores {
                    ledger: Arc::new(ledger),
                    sentences: Arc::new(sentences),
                    pool: Some(pool),
                })
            }
        }
    }
}
