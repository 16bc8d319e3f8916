//! Environment-resolved application settings.
//!
//! [`Settings`] is resolved once at startup and shared read-only (via `Arc`)
//! with every component that needs it. Resolution never fails: any missing or
//! unusable value falls back to its default.

use std::fmt;

use crate::config::env::{self, first_present};
use crate::database::connection_string::mask_password;

pub const DEFAULT_APP_NAME: &str = "Backend API";
pub const DEFAULT_DATABASE_HOST: &str = "db";
pub const DEFAULT_DATABASE_PORT: u16 = 5432;
pub const DEFAULT_DATABASE_USER: &str = "perfectboulder";
pub const DEFAULT_DATABASE_PASSWORD: &str = "perfectboulder";
pub const DEFAULT_DATABASE_NAME: &str = "perfectboulder";

/// Resolved application settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service display name.
    pub app_name: String,
    /// Explicit connection string; overrides the discrete fields when non-empty.
    pub database_url: Option<String>,
    pub database_host: String,
    pub database_port: u16,
    pub database_user: String,
    pub database_password: String,
    pub database_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            database_url: None,
            database_host: DEFAULT_DATABASE_HOST.to_string(),
            database_port: DEFAULT_DATABASE_PORT,
            database_user: DEFAULT_DATABASE_USER.to_string(),
            database_password: DEFAULT_DATABASE_PASSWORD.to_string(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(env::process_env)
    }

    /// Resolve settings using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |aliases: &[&'static str], default: String| {
            first_present(&lookup, aliases).map_or(default, |found| found.value)
        };

        let database_port = match first_present(&lookup, env::DATABASE_PORT) {
            Some(found) => found.value.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    key = found.key,
                    value = %found.value,
                    default = DEFAULT_DATABASE_PORT,
                    "Ignoring invalid database port"
                );
                DEFAULT_DATABASE_PORT
            }),
            None => defaults.database_port,
        };

        Self {
            app_name: text(env::APP_NAME, defaults.app_name),
            database_url: first_present(&lookup, env::DATABASE_URL).map(|found| found.value),
            database_host: text(env::DATABASE_HOST, defaults.database_host),
            database_port,
            database_user: text(env::DATABASE_USER, defaults.database_user),
            database_password: text(env::DATABASE_PASSWORD, defaults.database_password),
            database_name: text(env::DATABASE_NAME, defaults.database_name),
        }
    }

    /// The canonical connection string, credentials included.
    ///
    /// An explicit, non-empty `database_url` is returned verbatim; otherwise one
    /// is synthesized from the discrete fields, with user and password
    /// percent-encoded.
    pub fn connection_string(&self) -> String {
        match self.database_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "postgresql://{}:{}@{}:{}/{}",
                urlencoding::encode(&self.database_user),
                urlencoding::encode(&self.database_password),
                self.database_host,
                self.database_port,
                self.database_name,
            ),
        }
    }

    /// The connection string with its password masked, safe to display.
    pub fn masked_connection_string(&self) -> String {
        mask_password(&self.connection_string())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("database_host", &self.database_host)
            .field("database_port", &self.database_port)
            .field("database_user", &self.database_user)
            .field("database_password", &"[REDACTED]")
            .field("database_name", &self.database_name)
            .finish()
    }
}
