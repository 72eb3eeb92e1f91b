//! Command-line interface definition for sercat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for authentication, catalog listing, probing
//! and loading series metadata, and interactive exploration.

use clap::{Parser, Subcommand};

/// sercat - series catalog explorer
///
/// Browse a financial data provider's catalog from the terminal:
/// authenticate, pick a source, probe its series count, and load and
/// inspect full series metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "sercat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the provider API base URL
    #[arg(long, env = "SERCAT_API_BASE")]
    pub api_base: Option<String>,

    /// Override the path to the sources catalog file
    #[arg(long)]
    pub sources: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for sercat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Store provider credentials and verify them with a login call
    Login {
        /// Provider access ID
        #[arg(long, env = "SERCAT_ACCESS_ID")]
        access_id: Option<String>,

        /// Provider secret key
        #[arg(long, env = "SERCAT_SECRET_KEY")]
        secret_key: Option<String>,
    },

    /// Clear stored provider credentials
    Logout,

    /// List the sources available in the static catalog
    Sources,

    /// Probe a source for its total series count (cheap, first page only)
    Probe {
        /// Source to probe (catalog name or id)
        #[arg(short, long)]
        source: String,
    },

    /// Load full series metadata for a source and show summary statistics
    Load {
        /// Source to load (catalog name or id)
        #[arg(short, long)]
        source: String,

        /// Skip the confirmation prompt for large loads
        #[arg(short, long)]
        yes: bool,

        /// Case-insensitive keyword filter over series name and id
        #[arg(short, long)]
        filter: Option<String>,

        /// Page of the series table to display (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show the full metadata detail view for a single series
    Show {
        /// Source the series belongs to (catalog name or id)
        #[arg(short, long)]
        source: String,

        /// Series id to display
        #[arg(long)]
        series: String,

        /// Skip the confirmation prompt for large loads
        #[arg(short, long)]
        yes: bool,
    },

    /// Start an interactive exploration session
    Explore,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            api_base: None,
            sources: None,
            verbose: false,
            command: Commands::Sources,
        }
    }
}
