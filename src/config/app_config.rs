use serde::Deserialize;

use crate::infrastructure::immersion_kit::DEFAULT_BASE_URL;
use crate::infrastructure::services::SentenceCacheConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig};
use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub upstream: UpstreamSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub min_sufficient: usize,
    pub max_local_results: usize,
    /// Unset keeps zero-result terms empty forever
    pub empty_result_ttl_secs: Option<i64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 27474,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            url: PostgresConfig::default().url,
            max_connections: 10,
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        let defaults = SentenceCacheConfig::default();
        Self {
            min_sufficient: defaults.min_sufficient,
            max_local_results: defaults.max_local_results,
            empty_result_ttl_secs: None,
        }
    }
}

impl StorageSettings {
    pub fn to_storage_config(&self) -> Result<StorageConfig, DomainError> {
        StorageConfig::from_backend(
            &self.backend,
            PostgresConfig::new(&self.url).with_max_connections(self.max_connections),
        )
    }
}

impl CacheSettings {
    /// Fails on a TTL that is not positive or does not fit a `chrono::Duration`
    pub fn to_cache_config(&self) -> Result<SentenceCacheConfig, DomainError> {
        let config = SentenceCacheConfig::default()
            .with_min_sufficient(self.min_sufficient)
            .with_max_local_results(self.max_local_results);

        let Some(secs) = self.empty_result_ttl_secs else {
            return Ok(config);
        };

        let ttl = chrono::Duration::try_seconds(secs)
            .filter(|_| secs > 0)
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "cache.empty_result_ttl_secs must be a positive number of seconds, got {}",
                    secs
                ))
            })?;

        Ok(config.with_empty_result_ttl(ttl))
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local`, then `APP__*` environment
    /// variables. `DATABASE_URL` overrides `storage.url` when set.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            app_config.storage.url = url;
        }

        Ok(app_config)
    }
}
