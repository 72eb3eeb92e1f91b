//! Interactive exploration session
//!
//! A readline-based loop mirroring the one-shot commands: pick a
//! source, probe it, load metadata (confirming large loads
//! explicitly), filter the series table, and inspect single series.
//! Provider errors are surfaced as messages and the loop continues;
//! the session simply falls back to its idle state.

use crate::catalog::SourceCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::progress::TerminalProgress;
use crate::session::{LoadGate, SessionState};

use super::{open_session, view};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// One parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
enum ExploreCommand {
    Help,
    Sources,
    Probe(String),
    Load,
    Confirm,
    Cancel,
    Filter(Option<String>),
    Page(usize),
    Show(String),
    Reset,
    Quit,
    Unknown(String),
}

/// Parse one input line into a command
fn parse_command(line: &str) -> Option<ExploreCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    Some(match word {
        "help" | "?" => ExploreCommand::Help,
        "sources" => ExploreCommand::Sources,
        "probe" if !rest.is_empty() => ExploreCommand::Probe(rest.to_string()),
        "load" => ExploreCommand::Load,
        "confirm" => ExploreCommand::Confirm,
        "cancel" => ExploreCommand::Cancel,
        "filter" => ExploreCommand::Filter(if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }),
        "page" => match rest.parse() {
            Ok(page) if page >= 1 => ExploreCommand::Page(page),
            _ => ExploreCommand::Unknown(line.to_string()),
        },
        "show" if !rest.is_empty() => ExploreCommand::Show(rest.to_string()),
        "reset" => ExploreCommand::Reset,
        "quit" | "exit" => ExploreCommand::Quit,
        _ => ExploreCommand::Unknown(line.to_string()),
    })
}

fn print_help() {
    println!("Commands:");
    println!("  sources          list catalog sources");
    println!("  probe <source>   probe a source (name or id) for its series count");
    println!("  load             load full metadata for the probed source");
    println!("  confirm          confirm a pending large load");
    println!("  cancel           cancel a pending large load");
    println!("  filter [kw]      set or clear the series table keyword filter");
    println!("  page <n>         show page n of the series table");
    println!("  show <id>        show the detail view for one series");
    println!("  reset            discard the current search");
    println!("  quit             leave the explorer");
}

/// Run the interactive exploration loop
///
/// # Arguments
///
/// * `config` - Global configuration (consumed for the session
///   lifetime)
pub async fn run_explore(config: Config) -> Result<()> {
    let catalog = SourceCatalog::shared(&config.catalog.sources_path)?;
    let mut session = open_session(&config).await?;

    let mut filter: Option<String> = None;
    let mut page: usize = 1;

    println!("{}", "sercat explorer".bold());
    println!("Type 'help' for commands, 'quit' to leave.");

    let mut editor = DefaultEditor::new()
        .map_err(|e| crate::error::SercatError::Config(format!("readline init failed: {}", e)))?;

    loop {
        let line = match editor.readline("sercat> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                line
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Readline error: {}", e);
                break;
            }
        };

        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            ExploreCommand::Help => print_help(),
            ExploreCommand::Sources => view::render_sources_table(&catalog),
            ExploreCommand::Probe(reference) => {
                let source = match catalog.resolve(&reference) {
                    Ok(source) => source.clone(),
                    Err(e) => {
                        println!("{}", e.to_string().red());
                        continue;
                    }
                };
                match session.probe(&source.id).await {
                    Ok(summary) => {
                        filter = None;
                        page = 1;
                        println!("Probed source '{}'.", source.name);
                        view::render_summary(summary);
                    }
                    Err(e) => {
                        tracing::error!("Probe failed: {:#}", e);
                        println!("{}", "An error occurred during the search.".red());
                    }
                }
            }
            ExploreCommand::Load => match session.request_load() {
                Ok(LoadGate::NothingToLoad) => {
                    println!("{}", "No series to load for this source.".yellow());
                }
                Ok(LoadGate::ConfirmationRequired) => {
                    let total = session.summary().map(|s| s.total_count).unwrap_or(0);
                    println!(
                        "{}",
                        format!(
                            "This source contains {} series; loading all metadata may take a while.",
                            total
                        )
                        .yellow()
                    );
                    println!("Type 'confirm' to proceed or 'cancel' to abort.");
                }
                Ok(LoadGate::Ready) => {
                    drain(&mut session).await;
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
            ExploreCommand::Confirm => match session.confirm_load() {
                Ok(()) => {
                    drain(&mut session).await;
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
            ExploreCommand::Cancel => {
                session.cancel_load();
                println!("Load cancelled.");
            }
            ExploreCommand::Filter(keyword) => {
                filter = keyword;
                page = 1;
                show_table(&session, &config, filter.as_deref(), page);
            }
            ExploreCommand::Page(requested) => {
                page = requested;
                show_table(&session, &config, filter.as_deref(), page);
            }
            ExploreCommand::Show(series_id) => {
                match session.records().iter().find(|r| r.id == series_id) {
                    Some(record) => view::render_series_detail(record),
                    None => println!(
                        "{}",
                        format!("Series '{}' not found in the loaded metadata.", series_id).red()
                    ),
                }
            }
            ExploreCommand::Reset => {
                session.reset();
                filter = None;
                page = 1;
                println!("Search discarded.");
            }
            ExploreCommand::Quit => break,
            ExploreCommand::Unknown(input) => {
                println!(
                    "{}",
                    format!("Unknown command: {} (try 'help')", input).red()
                );
            }
        }
    }

    println!("Bye.");
    Ok(())
}

/// Drain the full result set, rendering progress and the outcome
async fn drain(session: &mut crate::session::SearchSession) {
    let mut progress = TerminalProgress::new();
    match session.load_all(&mut progress).await {
        Ok(summary) => {
            println!("{}", "All series metadata loaded successfully.".green());
            view::render_summary(summary);
        }
        Err(e) => {
            tracing::error!("Load failed: {:#}", e);
            println!(
                "{}",
                "An error occurred while fetching series details.".red()
            );
        }
    }
}

/// Render the series table when records are loaded
fn show_table(
    session: &crate::session::SearchSession,
    config: &Config,
    filter: Option<&str>,
    page: usize,
) {
    if session.state() != SessionState::Loaded {
        println!("{}", "No metadata loaded yet; probe and load first.".yellow());
        return;
    }
    let filtered = view::filter_records(session.records(), filter);
    view::render_series_table(&filtered, page, config.search.grid_page_size);
}
