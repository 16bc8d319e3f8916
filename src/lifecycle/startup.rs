//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Run the database readiness probe before traffic is accepted
//! - Bind the listener last
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, unless the probe policy says
//!   `continue`

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{
    load_config, ConfigError, ProbeConfig, ProbeFailurePolicy, ServiceConfig, Settings,
};
use crate::database::{ensure_ready, ConnectionOpener, DatabaseUnavailable, ProbeTimeouts};
use crate::observability::metrics;

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Database(#[from] DatabaseUnavailable),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Load the service configuration, falling back to defaults without a path.
pub fn load_service_config(path: Option<&Path>) -> Result<ServiceConfig, StartupError> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(ServiceConfig::default()),
    }
}

/// Run the readiness probe according to `probe`.
///
/// Returns `Ok(())` when the probe passes, is disabled, or fails under the
/// `continue` policy.
pub async fn check_database(
    opener: Arc<dyn ConnectionOpener>,
    settings: &Settings,
    probe: &ProbeConfig,
) -> Result<(), StartupError> {
    if !probe.enabled {
        tracing::info!("Database readiness probe disabled");
        return Ok(());
    }

    let database_url = settings.masked_connection_string();
    tracing::info!(
        database_url = %database_url,
        connect_timeout_secs = probe.connect_timeout_secs,
        overall_timeout_secs = probe.overall_timeout_secs,
        "Checking database readiness"
    );

    let timeouts = ProbeTimeouts {
        connect: probe.connect_timeout(),
        overall: probe.overall_timeout(),
    };

    match ensure_ready(opener, &settings.connection_string(), timeouts).await {
        Ok(()) => {
            metrics::record_probe(true);
            tracing::info!(database_url = %database_url, "Database is ready");
            Ok(())
        }
        Err(e) => {
            metrics::record_probe(false);
            tracing::error!(
                database_url = %database_url,
                cause = %e.failure(),
                "Database readiness probe failed"
            );
            match probe.on_failure {
                ProbeFailurePolicy::Abort => Err(e.into()),
                ProbeFailurePolicy::Continue => {
                    tracing::warn!("Continuing startup without a reachable database");
                    Ok(())
                }
            }
        }
    }
}

/// Bind the TCP listener for the HTTP server.
pub async fn bind_listener(address: &str) -> Result<TcpListener, StartupError> {
    let bind_error = |source: std::io::Error| StartupError::Bind {
        address: address.to_string(),
        source,
    };

    let addr: SocketAddr = address
        .parse()
        .map_err(|e| bind_error(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;
    let listener = TcpListener::bind(addr).await.map_err(bind_error)?;

    let local_addr = listener.local_addr().map_err(bind_error)?;
    tracing::info!(address = %local_addr, "Listening for connections");
    Ok(listener)
}
