//! Environment variable names and alias lookup.
//!
//! Each setting accepts an ordered list of variable names. The first name that
//! is present in the environment wins; later names are only consulted when
//! every earlier one is absent.

/// Service display name.
pub const APP_NAME: &[&str] = &["APP_NAME", "BACKEND_APP_NAME"];

/// Full connection string, used verbatim when set.
pub const DATABASE_URL: &[&str] = &["DATABASE_URL", "BACKEND_DATABASE_URL"];

pub const DATABASE_HOST: &[&str] = &["DB_HOST", "BACKEND_DATABASE_HOST", "DATABASE_HOST"];
pub const DATABASE_PORT: &[&str] = &["DB_PORT", "BACKEND_DATABASE_PORT", "DATABASE_PORT"];
pub const DATABASE_USER: &[&str] = &["DB_USER", "BACKEND_DATABASE_USER", "DATABASE_USER"];
pub const DATABASE_PASSWORD: &[&str] = &[
    "DB_PASSWORD",
    "BACKEND_DATABASE_PASSWORD",
    "DATABASE_PASSWORD",
];
pub const DATABASE_NAME: &[&str] = &["DB_NAME", "BACKEND_DATABASE_NAME", "DATABASE_NAME"];

/// A value found under one of a setting's aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    /// The alias that supplied the value.
    pub key: &'static str,
    pub value: String,
}

/// Return the value of the first alias present according to `lookup`.
pub fn first_present<F>(lookup: &F, aliases: &[&'static str]) -> Option<Found>
where
    F: Fn(&str) -> Option<String>,
{
    aliases
        .iter()
        .find_map(|&key| lookup(key).map(|value| Found { key, value }))
}

/// Lookup function backed by the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
