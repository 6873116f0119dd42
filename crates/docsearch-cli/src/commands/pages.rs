//! Page listing

use anyhow::Result;
use docsearch_core::DocIndex;

use crate::output::text::display_location;
use crate::output::{OutputFormat, json::JsonFormatter, text::TextFormatter};

pub fn execute(index: &DocIndex, format: OutputFormat) -> Result<()> {
    let pages = index.pages();

    match format {
        OutputFormat::Text => TextFormatter::format_pages(&pages),
        OutputFormat::Json | OutputFormat::Jsonl => JsonFormatter::format_list(&pages, format)?,
        OutputFormat::Raw => {
            for page in &pages {
                println!("{}", display_location(&page.path));
            }
        },
    }
    Ok(())
}
