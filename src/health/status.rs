//! Health and database-configuration payloads.

use serde::{Deserialize, Serialize};

use crate::config::Settings;

/// Response envelope shared by every REST endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub error: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            error: false,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// Error envelope; `data` serializes as `null`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            data: (),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfigView {
    /// Connection string with the password masked.
    pub database_url: String,
}

pub fn health_status(settings: &Settings) -> ApiResponse<HealthStatus> {
    ApiResponse::ok(
        "Service healthy",
        HealthStatus {
            status: "ok".to_string(),
            service: settings.app_name.clone(),
        },
    )
}

pub fn database_config(settings: &Settings) -> ApiResponse<DatabaseConfigView> {
    ApiResponse::ok(
        "Database configuration",
        DatabaseConfigView {
            database_url: settings.masked_connection_string(),
        },
    )
}
