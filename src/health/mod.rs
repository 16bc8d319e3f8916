//! Health reporting.
//!
//! # Data Flow
//! ```text
//! Settings (Arc, read-only)
//!     → status.rs (HealthStatus / DatabaseConfigView in an ApiResponse)
//!     → REST handlers and GraphQL resolvers
//! ```
//!
//! Database reachability is checked once at startup by
//! [`crate::database::probe`], not on each health request.

pub mod status;

pub use status::{database_config, health_status, ApiResponse, DatabaseConfigView, HealthStatus};
