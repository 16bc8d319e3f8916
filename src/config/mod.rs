//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (listener, timeouts, probe, observability)
//!
//! environment (.env + process)
//!     → env.rs (ordered alias lookup)
//!     → settings.rs (defaults, connection string, masked view)
//!     → Settings, shared via Arc to handlers and the probe
//! ```
//!
//! # Design Decisions
//! - Both halves are immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Environment resolution never fails; file loading can

pub mod env;
pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ProbeConfig, ProbeFailurePolicy,
    ServiceConfig, TimeoutConfig,
};
pub use settings::Settings;
