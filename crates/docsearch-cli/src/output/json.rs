//! JSON output formatting

use anyhow::Result;
use serde::Serialize;

use super::OutputFormat;

pub struct JsonFormatter;

impl JsonFormatter {
    /// Print a list as a JSON array, or one object per line for JSONL.
    pub fn format_list<T: Serialize>(items: &[T], format: OutputFormat) -> Result<()> {
        if format == OutputFormat::Jsonl {
            for item in items {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        Ok(())
    }

    /// Print a single value, pretty for JSON and compact for JSONL.
    pub fn format_value<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
        let json = if format == OutputFormat::Jsonl {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        println!("{json}");
        Ok(())
    }
}
