//! Application configuration loaded from environment variables.

use domain::BookingPolicy;
use thiserror::Error;

/// Errors raised for malformed configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be a boolean (true/false/1/0), got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `DATABASE_URL`: PostgreSQL connection string; the in-memory store is
///   used when unset
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
/// - `BOOKING_SINGLE_PER_USER`: reject a second booking per user (default: `false`)
/// - `BOOKING_VERIFY_OWNER`: reject room changes of foreign bookings (default: `false`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub policy: BookingPolicy,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults
    /// for unset values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => parse_number("PORT", value)?,
            None => defaults.port,
        };
        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => parse_number("DATABASE_MAX_CONNECTIONS", value)?,
            None => defaults.database_max_connections,
        };
        let single_booking_per_user = match lookup("BOOKING_SINGLE_PER_USER") {
            Some(value) => parse_flag("BOOKING_SINGLE_PER_USER", value)?,
            None => defaults.policy.single_booking_per_user,
        };
        let verify_booking_owner = match lookup("BOOKING_VERIFY_OWNER") {
            Some(value) => parse_flag("BOOKING_VERIFY_OWNER", value)?,
            None => defaults.policy.verify_booking_owner,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            database_max_connections,
            policy: BookingPolicy {
                single_booking_per_user,
                verify_booking_owner,
            },
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            database_url: None,
            database_max_connections: 5,
            policy: BookingPolicy::default(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}
