//! Configuration management for sercat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SercatError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for sercat
///
/// This structure holds all configuration needed by the explorer,
/// including provider endpoint settings, search behavior, and the
/// static source catalog location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data provider (API endpoint) configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Search and load behavior configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Static source catalog configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Data provider configuration
///
/// Specifies the provider API endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the provider API
    ///
    /// Configured once at startup; all login and search requests are
    /// issued against this base. Tests point it at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://api.ceicdata.com/v2".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Search and load behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Series count above which a full metadata load requires explicit
    /// confirmation
    ///
    /// A load of exactly this many series proceeds without confirmation;
    /// one more requires it.
    #[serde(default = "default_large_load_threshold")]
    pub large_load_threshold: u64,

    /// Number of series shown per page in the series table
    #[serde(default = "default_grid_page_size")]
    pub grid_page_size: usize,
}

fn default_large_load_threshold() -> u64 {
    500
}

fn default_grid_page_size() -> usize {
    50
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            large_load_threshold: default_large_load_threshold(),
            grid_page_size: default_grid_page_size(),
        }
    }
}

/// Static source catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the sources JSON file (read-only, name-to-id mapping)
    #[serde(default = "default_sources_path")]
    pub sources_path: String,
}

fn default_sources_path() -> String {
    "sources.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sources_path: default_sources_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            search: SearchConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SercatError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SercatError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_base) = std::env::var("SERCAT_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(timeout) = std::env::var("SERCAT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid SERCAT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(threshold) = std::env::var("SERCAT_LARGE_LOAD_THRESHOLD") {
            if let Ok(value) = threshold.parse() {
                self.search.large_load_threshold = value;
            } else {
                tracing::warn!("Invalid SERCAT_LARGE_LOAD_THRESHOLD: {}", threshold);
            }
        }

        if let Ok(sources_path) = std::env::var("SERCAT_SOURCES_PATH") {
            self.catalog.sources_path = sources_path;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_base) = &cli.api_base {
            self.provider.api_base = api_base.clone();
        }

        if let Some(sources) = &cli.sources {
            self.catalog.sources_path = sources.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Returns
    ///
    /// Returns Ok(()) if the configuration is valid
    ///
    /// # Errors
    ///
    /// Returns `SercatError::Config` if a field holds an unusable value
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.provider.api_base).map_err(|e| {
            SercatError::Config(format!(
                "Invalid provider api_base '{}': {}",
                self.provider.api_base, e
            ))
        })?;

        if self.provider.timeout_seconds == 0 {
            return Err(
                SercatError::Config("provider.timeout_seconds must be non-zero".to_string()).into(),
            );
        }

        if self.search.grid_page_size == 0 {
            return Err(
                SercatError::Config("search.grid_page_size must be non-zero".to_string()).into(),
            );
        }

        Ok(())
    }
}
