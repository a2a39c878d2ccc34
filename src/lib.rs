//! Sentence cache
//!
//! A cache-through lookup service for example sentences keyed by a dictionary
//! term:
//! - A ledger remembers how many examples each term had upstream
//! - Kana-fuzzy regex search over the local sentence store
//! - Upstream results are written back in the background

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use infrastructure::immersion_kit::ImmersionKitClient;
use infrastructure::services::SentenceService;
use infrastructure::storage::{SentenceStores, StorageFactory};
use tracing::info;

/// Connects the configured storage backend
pub async fn create_stores(config: &AppConfig) -> anyhow::Result<SentenceStores> {
    let storage_config = config.storage.to_storage_config()?;
    info!("Storage backend: {:?}", storage_config.storage_type());

    Ok(StorageFactory::create_sentence_stores(&storage_config).await?)
}

/// Wires the lookup service over existing stores and the upstream client
pub fn create_sentence_service(
    config: &AppConfig,
    stores: &SentenceStores,
) -> anyhow::Result<SentenceService> {
    let client = ImmersionKitClient::new(
        config.upstream.base_url.clone(),
        Duration::from_secs(config.upstream.timeout_secs),
    )?;
    info!(base_url = %config.upstream.base_url, "Upstream source configured");

    Ok(SentenceService::new(
        stores.ledger.clone(),
        stores.sentences.clone(),
        Arc::new(client),
        config.cache.to_cache_config()?,
    ))
}

/// Create the application state over existing stores
pub fn create_app_state(config: &AppConfig, stores: SentenceStores) -> anyhow::Result<AppState> {
    let service = create_sentence_service(config, &stores)?;
    Ok(AppState::new(Arc::new(service), stores))
}

/// Create the application state, connecting storage from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let stores = create_stores(config).await?;
    create_app_state(config, stores)
}
