//! Full-text search over the loaded index

use anyhow::Result;
use docsearch_core::{Category, Config, DocIndex, SearchIndex, SearchQuery};
use tracing::debug;

use crate::output::text::display_location;
use crate::output::{OutputFormat, json::JsonFormatter, text::TextFormatter};

pub fn execute(
    index: &DocIndex,
    config: &Config,
    query: &str,
    categories: Vec<Category>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let limit = limit.unwrap_or(config.search.limit);

    let mut search_index = SearchIndex::in_memory()?
        .with_title_boost(config.search.title_boost)
        .with_snippet_chars(config.search.snippet_chars);
    search_index.index_entries(index)?;
    debug!("Indexed {} documents", search_index.num_docs());

    let hits = search_index.search(&SearchQuery::new(query, limit).with_categories(categories))?;

    match format {
        OutputFormat::Text => TextFormatter::format_search_results(query, &hits),
        OutputFormat::Json | OutputFormat::Jsonl => JsonFormatter::format_list(&hits, format)?,
        OutputFormat::Raw => {
            for hit in &hits {
                println!("{}", display_location(&hit.location));
            }
        },
    }
    Ok(())
}
