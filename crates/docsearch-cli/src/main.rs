//! docsearch CLI - query documentation search indexes from the terminal
//!
//! This is the main entry point for the `docsearch` command-line interface.
//! Command implementations live in [`commands`]; this file parses flags,
//! sets up logging and loads the index the command needs.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};
use utils::cli_args::CategoryArg;
use utils::loading::Session;
use utils::logging::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    if !execute_command(&cli).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Run the selected command; `Ok(false)` means "completed, but failed".
async fn execute_command(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Completions { shell } => {
            commands::generate(*shell);
            return Ok(true);
        },
        Commands::Cache { command } => {
            commands::manage_cache(command)?;
            return Ok(true);
        },
        _ => {},
    }

    let session = Session::from_cli(cli)?;
    let index = session.load().await?;

    match &cli.command {
        Commands::Search {
            query,
            categories,
            limit,
            format,
        } => commands::search(
            &index,
            &session.config,
            &query.join(" "),
            CategoryArg::expand(categories),
            *limit,
            format.resolve(),
        )?,
        Commands::Lookup {
            name,
            limit,
            format,
        } => commands::lookup_symbols(&index, name, *limit, format.resolve())?,
        Commands::Show {
            location,
            url,
            format,
        } => {
            let base_url = if *url { session.base_url()? } else { None };
            commands::show_location(&index, location, base_url.as_ref(), *url, format.resolve())?;
        },
        Commands::Pages { format } => commands::list_pages(&index, format.resolve())?,
        Commands::Stats { format } => commands::show_stats(&index, format.resolve())?,
        Commands::Validate { strict, format } => {
            return commands::validate_index(&index, *strict, format.resolve());
        },
        Commands::Export {
            js,
            compact,
            output,
        } => commands::export_index(&index, *js, *compact, output.as_deref())?,
        Commands::Cache { .. } | Commands::Completions { .. } => {},
    }
    Ok(true)
}
