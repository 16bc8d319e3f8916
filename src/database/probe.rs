//! Startup readiness probe.
//!
//! # Responsibilities
//! - Open one connection with a bounded connect timeout
//! - Run a trivial liveness statement and discard the result
//! - Release the connection on every path
//! - Bound the whole sequence, including task scheduling, with an outer timeout
//!
//! # Design Decisions
//! - The open-and-ping sequence runs on its own Tokio task; the caller only
//!   awaits the join handle
//! - Every failure is reported as [`DatabaseUnavailable`]; driver errors only
//!   appear boxed inside its [`ProbeFailure`] cause
//! - One-shot: no retries here, restart policy belongs to the supervisor

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Boxed error produced by a [`ConnectionOpener`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opens probe connections to the data store.
#[async_trait]
pub trait ConnectionOpener: Send + Sync + 'static {
    /// Open a connection, giving up after `connect_timeout`.
    async fn open(
        &self,
        connection_string: &str,
        connect_timeout: Duration,
    ) -> Result<Box<dyn ProbeConnection>, BoxError>;
}

/// A live connection owned by the probe. Dropping it closes the connection.
#[async_trait]
pub trait ProbeConnection: Send {
    /// Run the liveness statement.
    async fn ping(&mut self) -> Result<(), BoxError>;
}

/// Probe time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    /// Limit for opening the connection.
    pub connect: Duration,
    /// Limit for the whole probe.
    pub overall: Duration,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            overall: Duration::from_secs(10),
        }
    }
}

/// Why a probe failed.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    #[error("connect failed: {0}")]
    Connect(#[source] BoxError),

    #[error("liveness query failed: {0}")]
    Query(#[source] BoxError),

    #[error("probe did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("probe task failed: {0}")]
    Worker(String),
}

/// The data store could not be reached or did not answer.
#[derive(Debug, Error)]
#[error("Database connection failed")]
pub struct DatabaseUnavailable {
    #[source]
    cause: ProbeFailure,
}

impl DatabaseUnavailable {
    pub fn failure(&self) -> &ProbeFailure {
        &self.cause
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.cause, ProbeFailure::TimedOut(_))
    }
}

impl From<ProbeFailure> for DatabaseUnavailable {
    fn from(cause: ProbeFailure) -> Self {
        Self { cause }
    }
}

/// Check that the data store behind `connection_string` accepts connections
/// and answers a trivial query.
///
/// Blocks the calling task for at most `timeouts.overall`. When the outer
/// timeout fires the worker task is aborted; the underlying socket attempt is
/// not guaranteed to be interrupted.
pub async fn ensure_ready(
    opener: Arc<dyn ConnectionOpener>,
    connection_string: &str,
    timeouts: ProbeTimeouts,
) -> Result<(), DatabaseUnavailable> {
    let dsn = connection_string.to_string();
    let connect_timeout = timeouts.connect;

    let mut worker = tokio::spawn(open_and_ping(opener, dsn, connect_timeout));

    let outcome = match tokio::time::timeout(timeouts.overall, &mut worker).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(ProbeFailure::Worker(join_error.to_string())),
        Err(_) => {
            worker.abort();
            Err(ProbeFailure::TimedOut(timeouts.overall))
        }
    };

    match outcome {
        Ok(()) => {
            tracing::debug!("Database probe succeeded");
            Ok(())
        }
        Err(cause) => {
            tracing::debug!(error = %cause, "Database probe failed");
            Err(cause.into())
        }
    }
}

async fn open_and_ping(
    opener: Arc<dyn ConnectionOpener>,
    dsn: String,
    connect_timeout: Duration,
) -> Result<(), ProbeFailure> {
    let mut connection = opener
        .open(&dsn, connect_timeout)
        .await
        .map_err(ProbeFailure::Connect)?;
    connection.ping().await.map_err(ProbeFailure::Query)
}
