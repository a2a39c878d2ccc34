//! PostgreSQL storage implementation with connection pooling

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use crate::domain::storage::{PatternFilter, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// PostgreSQL storage configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/sentence_cache".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Opens the connection pool shared by every table-backed storage
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// PostgreSQL storage implementation
///
/// Stores each entity as a JSONB document keyed by its storage key. Pattern
/// filters are evaluated with the `~` operator on `data->>field`.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table_name: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new PostgreSQL storage with the given pool and table name
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
            _phantom: PhantomData,
        }
    }

    /// Ensures the storage table exists
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                key TEXT PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    fn decode(row: &sqlx::postgres::PgRow) -> Result<E, DomainError> {
        let data: serde_json::Value = row.get("data");
        serde_json::from_value(data)
            .map_err(|e| DomainError::storage(format!("Failed to deserialize entity: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let query = format!("SELECT data FROM {} WHERE key = $1", self.table_name);

        let result = sqlx::query(&query)
            .bind(key.as_key().into_owned())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get entity: {}", e)))?;

        result.as_ref().map(Self::decode).transpose()
    }

    async fn find(
        &self,
        filter: &PatternFilter,
        limit: Option<usize>,
    ) -> Result<Vec<E>, DomainError> {
        // LIMIT NULL is LIMIT ALL
        let query = format!(
            "SELECT data FROM {} WHERE data->>$1 ~ $2 ORDER BY created_at LIMIT $3",
            self.table_name
        );

        let rows = sqlx::query(&query)
            .bind(&filter.field)
            .bind(&filter.pattern)
            .bind(limit.map(|l| l.min(i64::MAX as usize) as i64))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to find entities: {}", e)))?;

        rows.iter().map(Self::decode).collect()
    }

    async fn replace(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_key().into_owned();
        let data = serde_json::to_value(&entity).map_err(|e| {
            DomainError::storage(format!("Failed to serialize entity: {}", e))
        })?;

        let query = format!(
            r#"
            INSERT INTO {} (key, data)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET data = EXCLUDED.data, updated_at = NOW()
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to replace entity '{}': {}", key, e))
            })?;

        Ok(entity)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let query = format!("SELECT COUNT(*) as count FROM {}", self.table_name);

        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count entities: {}", e)))?;

        let count: i64 = row.get("count");
        Ok(count as usize)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Ping failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_config_default() {
        let config = PostgresConfig::default();

        assert_eq!(config.url, "postgres://localhost:5432/sentence_cache");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.idle_timeout_secs, 600);
    }

    #[test]
    fn test_postgres_config_builder() {
        let config = PostgresConfig::new("postgres://db/test")
            .with_max_connections(20)
            .with_connect_timeout(5);

        assert_eq!(config.url, "postgres://db/test");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.connect_timeout_secs, 5);
    }
}
