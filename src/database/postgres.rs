//! PostgreSQL probe connections via tokio-postgres.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls};

use crate::database::probe::{BoxError, ConnectionOpener, ProbeConnection};

/// Statement used to check that the server answers.
pub const LIVENESS_QUERY: &str = "SELECT 1";

#[derive(Debug, Error)]
#[error("connect timed out after {0:?}")]
struct ConnectTimedOut(Duration);

/// Opens unpooled, non-TLS PostgreSQL connections for the readiness probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresOpener;

#[async_trait]
impl ConnectionOpener for PostgresOpener {
    async fn open(
        &self,
        connection_string: &str,
        connect_timeout: Duration,
    ) -> Result<Box<dyn ProbeConnection>, BoxError> {
        let mut config: Config = connection_string.parse()?;
        config.connect_timeout(connect_timeout);

        let (client, connection) = tokio::time::timeout(connect_timeout, config.connect(NoTls))
            .await
            .map_err(|_| ConnectTimedOut(connect_timeout))??;

        // The driver task ends once the client is dropped.
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::debug!(error = %e, "Probe connection ended with error");
            }
        });

        tracing::trace!("Probe connection opened");
        Ok(Box::new(PostgresConnection { client, driver }))
    }
}

struct PostgresConnection {
    client: Client,
    driver: JoinHandle<()>,
}

#[async_trait]
impl ProbeConnection for PostgresConnection {
    async fn ping(&mut self) -> Result<(), BoxError> {
        if self.driver.is_finished() {
            return Err("connection closed before liveness query".into());
        }
        self.client.simple_query(LIVENESS_QUERY).await?;
        Ok(())
    }
}

impl Drop for PostgresConnection {
    fn drop(&mut self) {
        tracing::trace!("Probe connection closed");
    }
}
