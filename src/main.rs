//! Sercat - Series catalog explorer CLI
//!
#![doc = "Sercat - Series catalog explorer CLI"]
#![doc = "Main entry point for the sercat application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sercat::cli::{Cli, Commands};
use sercat::commands;
use sercat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Login {
            access_id,
            secret_key,
        } => {
            tracing::info!("Verifying and storing provider credentials");
            commands::login(&config, access_id, secret_key).await?;
            Ok(())
        }
        Commands::Logout => {
            commands::logout()?;
            Ok(())
        }
        Commands::Sources => {
            commands::sources(&config)?;
            Ok(())
        }
        Commands::Probe { source } => {
            tracing::info!("Probing source: {}", source);
            commands::probe(&config, &source).await?;
            Ok(())
        }
        Commands::Load {
            source,
            yes,
            filter,
            page,
        } => {
            tracing::info!("Loading full metadata for source: {}", source);
            if yes {
                tracing::debug!("Large-load confirmation prompt suppressed");
            }
            commands::load(&config, &source, yes, filter.as_deref(), page).await?;
            Ok(())
        }
        Commands::Show {
            source,
            series,
            yes,
        } => {
            tracing::info!("Showing series {} from source {}", series, source);
            commands::show(&config, &source, &series, yes).await?;
            Ok(())
        }
        Commands::Explore => {
            tracing::info!("Starting interactive exploration session");
            commands::explore::run_explore(config).await?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "sercat=debug" } else { "sercat=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
