//! Index statistics command implementation

use anyhow::Result;
use docsearch_core::DocIndex;

use crate::output::{OutputFormat, json::JsonFormatter, text::TextFormatter};

pub fn execute(index: &DocIndex, format: OutputFormat) -> Result<()> {
    let stats = index.stats();

    match format {
        OutputFormat::Text => TextFormatter::format_stats(&stats),
        OutputFormat::Json | OutputFormat::Jsonl => JsonFormatter::format_value(&stats, format)?,
        OutputFormat::Raw => {
            println!("entries {}", stats.total_entries);
            for (category, count) in &stats.categories {
                println!("{category} {count}");
            }
            println!("pages {}", stats.distinct_pages);
            println!("locations {}", stats.distinct_locations);
        },
    }
    Ok(())
}
