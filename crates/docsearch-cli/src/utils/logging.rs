//! Logging initialization and color control.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{CacheCommands, Cli, Commands};
use crate::output::OutputFormat;

/// Initialize the tracing subscriber from the global flags.
///
/// Logs go to stderr. Machine-readable output lowers the level to errors
/// and turns colors off unless `--verbose` was given.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let mut level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let machine_output = command_format(&cli.command).is_some_and(OutputFormat::is_machine_readable);
    if machine_output && !cli.verbose {
        level = Level::ERROR;
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

fn command_format(command: &Commands) -> Option<OutputFormat> {
    match command {
        Commands::Search { format, .. }
        | Commands::Lookup { format, .. }
        | Commands::Show { format, .. }
        | Commands::Pages { format }
        | Commands::Stats { format }
        | Commands::Validate { format, .. }
        | Commands::Cache {
            command: CacheCommands::List { format },
        } => Some(format.resolve()),
        _ => None,
    }
}
