//! Serve command - runs the HTTP API server

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::{create_router_with_state, AppState};
use crate::config::AppConfig;

/// Run the API server until Ctrl+C or SIGTERM, then drain pending write-backs
pub async fn run() -> anyhow::Result<()> {
    let config = super::load_config()?;

    let stores = crate::create_stores(&config).await?;
    let service = Arc::new(crate::create_sentence_service(&config, &stores)?);
    let app = create_router_with_state(AppState::new(service.clone(), stores.clone()));

    let addr = build_socket_addr(&config)?;
    info!("Starting sentence cache on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // write-backs still hold store handles; the pool must outlive them
    service.shutdown().await;
    stores.close().await;
    info!("Server shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_socket_addr_defaults() {
        let addr = build_socket_addr(&AppConfig::default()).unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:27474");
    }

    #[test]
    fn test_build_socket_addr_rejects_hostname() {
        let mut config = AppConfig::default();
        config.server.host = "localhost".to_string();

        assert!(build_socket_addr(&config).is_err());
    }
}
