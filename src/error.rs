//! Error types for sercat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for sercat operations
///
/// This enum encompasses all possible errors that can occur during
/// authentication, provider interactions, catalog loading, and
/// configuration handling.
#[derive(Error, Debug)]
pub enum SercatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors (invalid credentials, unreachable identity provider)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Provider-related errors (API calls during probe or drain)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Source catalog errors (missing or corrupt sources file)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Session state errors (operation not permitted in current state)
    #[error("Session error: {0}")]
    Session(String),

    /// Missing credentials for the data provider
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for sercat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
