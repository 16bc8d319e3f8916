//! GraphQL adapter.
//!
//! Exposes the same health and configuration data as the REST endpoints
//! through a read-only query root.

pub mod schema;

pub use schema::{build_schema, AppSchema, QueryRoot};
