//! Cached remote index management

use anyhow::Result;
use colored::Colorize;
use docsearch_core::Storage;

use crate::cli::CacheCommands;
use crate::output::{OutputFormat, json::JsonFormatter, text::TextFormatter};

pub fn execute(command: &CacheCommands) -> Result<()> {
    let storage = Storage::new()?;

    match command {
        CacheCommands::List { format } => {
            let sources = storage.list()?;
            let format = format.resolve();
            match format {
                OutputFormat::Text => TextFormatter::format_cache_list(&sources),
                OutputFormat::Json | OutputFormat::Jsonl => {
                    JsonFormatter::format_list(&sources, format)?;
                },
                OutputFormat::Raw => {
                    for source in &sources {
                        println!("{}", source.url);
                    }
                },
            }
        },
        CacheCommands::Path => println!("{}", storage.root_dir().display()),
        CacheCommands::Clear => {
            let removed = storage.clear()?;
            println!(
                "{} {removed} cached index{}",
                "Removed".green(),
                if removed == 1 { "" } else { "es" }
            );
        },
    }
    Ok(())
}
