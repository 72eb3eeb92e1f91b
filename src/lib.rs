//! Sercat - Series catalog explorer library
//!
//! This library provides the core functionality for the sercat catalog
//! explorer: provider authentication, paginated metadata retrieval,
//! summary statistics, and the search session state machine behind the
//! CLI.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: Search session state machine, page fetcher, and statistics
//! - `provider`: Catalog provider abstraction and HTTP implementation
//! - `catalog`: Static source catalog loaded from disk
//! - `model`: Normalized series metadata types
//! - `credentials`: Credential resolution and keyring storage
//! - `progress`: Progress reporting during full metadata loads
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use sercat::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     // Session usage would go here
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod progress;
pub mod provider;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SercatError};
pub use model::MetadataRecord;
pub use session::{SearchSession, SearchSummary, SessionState};
