//! Backend API service.
//!
//! # Architecture Overview
//!
//! ```text
//!   environment (.env + process)        config file (TOML, optional)
//!              │                                   │
//!              ▼                                   ▼
//!      ┌──────────────┐                   ┌────────────────┐
//!      │   Settings   │                   │ ServiceConfig  │
//!      │ (Arc, r/o)   │                   │ listener/probe │
//!      └──────┬───────┘                   └───────┬────────┘
//!             │                                   │
//!             ├──────────────┐   ┌────────────────┤
//!             ▼              ▼   ▼                ▼
//!      ┌─────────────┐   ┌──────────────┐   ┌────────────┐
//!      │ REST + GQL  │   │ readiness    │   │ logging /  │
//!      │ handlers    │   │ probe (once) │   │ metrics    │
//!      └─────────────┘   └──────┬───────┘   └────────────┘
//!                               ▼
//!                          PostgreSQL
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use backend_api::config::Settings;
use backend_api::database::PostgresOpener;
use backend_api::http::HttpServer;
use backend_api::lifecycle::startup::{
    bind_listener, check_database, load_service_config, StartupError,
};
use backend_api::lifecycle::{signals, Shutdown};
use backend_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "backend-api", version)]
#[command(about = "Health and database configuration service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Existing process variables take precedence over the file.
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = load_service_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load environment file"),
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "backend-api starting");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run(config: backend_api::ServiceConfig) -> Result<(), StartupError> {
    let settings = Arc::new(Settings::from_env());

    tracing::info!(
        app_name = %settings.app_name,
        database_url = %settings.masked_connection_string(),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    check_database(Arc::new(PostgresOpener), &settings, &config.probe).await?;

    let listener = bind_listener(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config, settings);
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
