//! Command handlers for the CLI
//!
//! These handlers are intentionally small and use the library
//! components: the catalog provider, the source catalog, and the
//! search session. Provider-facing errors are converted here into
//! user-facing messages with full diagnostics going to the log; raw
//! errors never leak into presentation output.

pub mod explore;
pub mod view;

use crate::catalog::SourceCatalog;
use crate::config::Config;
use crate::credentials::{self, Credentials};
use crate::error::{Result, SercatError};
use crate::progress::TerminalProgress;
use crate::provider::{CatalogProvider, HttpCatalogProvider, SessionHandle};
use crate::session::{LoadGate, SearchSession};

use colored::Colorize;
use std::sync::Arc;

/// Store and verify provider credentials
///
/// Credentials come from the CLI flags or the environment; they are
/// verified with a login call before being stored in the keyring.
pub async fn login(
    config: &Config,
    access_id: Option<String>,
    secret_key: Option<String>,
) -> Result<()> {
    let creds = match (access_id, secret_key) {
        (Some(access_id), Some(secret_key)) => Credentials::new(access_id, secret_key),
        _ => {
            return Err(SercatError::MissingCredentials(
                "pass --access-id and --secret-key, or set SERCAT_ACCESS_ID and SERCAT_SECRET_KEY"
                    .to_string(),
            )
            .into());
        }
    };

    let provider = HttpCatalogProvider::new(&config.provider)?;
    match provider.login(&creds).await {
        Ok(_handle) => {
            credentials::store(&creds)?;
            println!("{}", "Authentication successful.".green());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Authentication failed: {:#}", e);
            // Stored credentials are cleared so a bad pair is not reused
            credentials::clear()?;
            Err(e)
        }
    }
}

/// Clear stored provider credentials
pub fn logout() -> Result<()> {
    credentials::clear()?;
    println!("Logged out; stored credentials cleared.");
    Ok(())
}

/// List the sources available in the static catalog
pub fn sources(config: &Config) -> Result<()> {
    let catalog = SourceCatalog::shared(&config.catalog.sources_path)?;
    if catalog.is_empty() {
        println!("{}", "The source catalog is empty.".yellow());
        return Ok(());
    }
    view::render_sources_table(&catalog);
    Ok(())
}

/// Open an authenticated search session
///
/// Resolves credentials, logs in, and wires the session with the
/// configured large-load threshold.
pub async fn open_session(config: &Config) -> Result<SearchSession> {
    let creds = credentials::resolve()?;
    let provider: Arc<dyn CatalogProvider> = Arc::new(HttpCatalogProvider::new(&config.provider)?);
    let handle: SessionHandle = provider.login(&creds).await?;
    Ok(SearchSession::new(
        provider,
        handle,
        config.search.large_load_threshold,
    ))
}

/// Probe a source for its total series count
pub async fn probe(config: &Config, source_ref: &str) -> Result<()> {
    let catalog = SourceCatalog::shared(&config.catalog.sources_path)?;
    let source = catalog.resolve(source_ref)?.clone();

    let mut session = open_session(config).await?;
    match session.probe(&source.id).await {
        Ok(summary) => {
            println!("Probed source '{}'.", source.name);
            view::render_summary(summary);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Probe failed for source {}: {:#}", source.id, e);
            eprintln!("{}", "An error occurred during the search.".red());
            Err(e)
        }
    }
}

/// Load full series metadata for a source and render the results
///
/// Large loads are gated: without `--yes` a total above the configured
/// threshold stops with instructions instead of silently fetching.
pub async fn load(
    config: &Config,
    source_ref: &str,
    yes: bool,
    filter: Option<&str>,
    page: usize,
) -> Result<()> {
    let catalog = SourceCatalog::shared(&config.catalog.sources_path)?;
    let source = catalog.resolve(source_ref)?.clone();

    let mut session = open_session(config).await?;
    let summary = match session.probe(&source.id).await {
        Ok(summary) => summary.clone(),
        Err(e) => {
            tracing::error!("Probe failed for source {}: {:#}", source.id, e);
            eprintln!("{}", "An error occurred during the search.".red());
            return Err(e);
        }
    };

    match session.request_load()? {
        LoadGate::NothingToLoad => {
            println!(
                "{}",
                format!("No series found for source '{}'.", source.name).yellow()
            );
            return Ok(());
        }
        LoadGate::ConfirmationRequired => {
            if yes {
                session.confirm_load()?;
            } else {
                session.cancel_load();
                println!(
                    "{}",
                    format!(
                        "Source '{}' contains {} series; loading all metadata may take a while.",
                        source.name, summary.total_count
                    )
                    .yellow()
                );
                println!("Re-run with --yes to proceed.");
                return Ok(());
            }
        }
        LoadGate::Ready => {}
    }

    let mut progress = TerminalProgress::new();
    match session.load_all(&mut progress).await {
        Ok(summary) => {
            println!("{}", "All series metadata loaded successfully.".green());
            view::render_summary(summary);
        }
        Err(e) => {
            tracing::error!("Load failed for source {}: {:#}", source.id, e);
            eprintln!(
                "{}",
                "An error occurred while fetching series details.".red()
            );
            return Err(e);
        }
    }

    let filtered = view::filter_records(session.records(), filter);
    view::render_series_table(&filtered, page, config.search.grid_page_size);
    Ok(())
}

/// Show the full metadata detail view for a single series
pub async fn show(config: &Config, source_ref: &str, series_id: &str, yes: bool) -> Result<()> {
    let catalog = SourceCatalog::shared(&config.catalog.sources_path)?;
    let source = catalog.resolve(source_ref)?.clone();

    let mut session = open_session(config).await?;
    session.probe(&source.id).await?;

    match session.request_load()? {
        LoadGate::NothingToLoad => {
            println!(
                "{}",
                format!("No series found for source '{}'.", source.name).yellow()
            );
            return Ok(());
        }
        LoadGate::ConfirmationRequired => {
            if yes {
                session.confirm_load()?;
            } else {
                session.cancel_load();
                println!(
                    "{}",
                    "This source requires a large metadata load; re-run with --yes.".yellow()
                );
                return Ok(());
            }
        }
        LoadGate::Ready => {}
    }

    let mut progress = TerminalProgress::new();
    session.load_all(&mut progress).await?;

    match session.records().iter().find(|r| r.id == series_id) {
        Some(record) => {
            view::render_series_detail(record);
            Ok(())
        }
        None => Err(SercatError::Session(format!(
            "series '{}' not found in source '{}'",
            series_id, source.name
        ))
        .into()),
    }
}
