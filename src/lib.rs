//! Backend API service library: health and database configuration over REST
//! and GraphQL, with a startup database readiness probe.

pub mod config;
pub mod database;
pub mod graphql;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{ServiceConfig, Settings};
pub use database::{ensure_ready, DatabaseUnavailable, PostgresOpener};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
