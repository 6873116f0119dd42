//! Symbol lookup

use anyhow::Result;
use docsearch_core::DocIndex;

use crate::output::{OutputFormat, json::JsonFormatter, text::TextFormatter};

pub fn execute(index: &DocIndex, name: &str, limit: usize, format: OutputFormat) -> Result<()> {
    let matches = docsearch_core::lookup_symbols(index, name, limit);

    match format {
        OutputFormat::Text => TextFormatter::format_symbols(name, &matches),
        OutputFormat::Json | OutputFormat::Jsonl => JsonFormatter::format_list(&matches, format)?,
        OutputFormat::Raw => {
            for m in &matches {
                println!("{}", m.location);
            }
        },
    }
    Ok(())
}
