//! Database access subsystem.
//!
//! # Data Flow
//! ```text
//! Settings
//!     → connection_string.rs (masked view for display and logs)
//!     → probe.rs (unmasked string, bounded open + SELECT 1)
//!         → postgres.rs (tokio-postgres connection opener)
//! ```
//!
//! # Design Decisions
//! - The service holds no pool; the only connection is the startup probe's
//! - The driver sits behind the ConnectionOpener trait so the probe can be
//!   exercised without a server

pub mod connection_string;
pub mod postgres;
pub mod probe;

pub use connection_string::{mask_password, PASSWORD_MASK};
pub use postgres::PostgresOpener;
pub use probe::{
    ensure_ready, ConnectionOpener, DatabaseUnavailable, ProbeConnection, ProbeFailure,
    ProbeTimeouts,
};
