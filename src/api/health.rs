//! Health check endpoints for Kubernetes probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::domain::{DomainError, Storage, StorageEntity};
use crate::infrastructure::storage::{LEDGER_TABLE, SENTENCE_TABLE};

use super::state::AppState;

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check - both collections must be reachable, since every lookup
/// reads the ledger and may read the sentence store
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let checks = vec![
        check_storage(LEDGER_TABLE, state.stores.ledger.as_ref()).await,
        check_storage(SENTENCE_TABLE, state.stores.sentences.as_ref()).await,
    ];

    let overall_status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let response = HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(checks),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    let status_code = match overall_status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy => StatusCode::OK,
    };

    (status_code, Json(response))
}

/// Liveness check - simple check to verify the service is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn check_storage<E>(name: &str, storage: &dyn Storage<E>) -> HealthCheck
where
    E: StorageEntity + 'static,
{
    let start = Instant::now();
    let result: Result<(), DomainError> = storage.ping().await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(()) => HealthCheck {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            message: None,
            latency_ms,
        },
        Err(e) => HealthCheck {
            name: name.to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms,
        },
    }
}
