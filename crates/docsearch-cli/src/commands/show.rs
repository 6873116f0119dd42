//! Show the entries stored at one location

use anyhow::{Result, bail};
use docsearch_core::{Category, DocIndex, Location};
use serde::Serialize;
use url::Url;

use crate::output::{OutputFormat, json::JsonFormatter, text::TextFormatter};

#[derive(Debug, Serialize)]
struct ShownEntry<'a> {
    ordinal: usize,
    location: &'a str,
    page: &'a str,
    title: &'a str,
    text: &'a str,
    category: &'a Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

pub fn execute(
    index: &DocIndex,
    location: &str,
    base_url: Option<&Url>,
    want_url: bool,
    format: OutputFormat,
) -> Result<()> {
    let entries = index.by_location(location);
    if entries.is_empty() {
        bail!("No entries at '{location}'. Run `docsearch pages` to list locations");
    }

    let url = if want_url {
        let Some(base) = base_url else {
            bail!("--url needs source.base_url in the config or a URL source");
        };
        Some(Location::parse(location.trim_start_matches('/')).resolve(base)?)
    } else {
        None
    };

    match format {
        OutputFormat::Text => {
            TextFormatter::format_entries(&entries, url.as_ref().map(Url::as_str));
        },
        OutputFormat::Json | OutputFormat::Jsonl => {
            let shown: Vec<ShownEntry<'_>> = entries
                .iter()
                .map(|(ordinal, entry)| ShownEntry {
                    ordinal: *ordinal,
                    location: &entry.location,
                    page: &entry.page,
                    title: &entry.title,
                    text: &entry.text,
                    category: &entry.category,
                    url: url.as_ref().map(ToString::to_string),
                })
                .collect();
            JsonFormatter::format_list(&shown, format)?;
        },
        OutputFormat::Raw => match url {
            Some(url) => println!("{url}"),
            None => {
                for (_, entry) in &entries {
                    println!("{}", entry.text);
                }
            },
        },
    }
    Ok(())
}
