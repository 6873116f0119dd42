//! Index validation command - shape checks with a CI-friendly exit code

use anyhow::Result;
use docsearch_core::{DocIndex, validate};

use crate::output::{OutputFormat, json::JsonFormatter, text::TextFormatter};

/// Print the report and return whether the index passed.
pub fn execute(index: &DocIndex, strict: bool, format: OutputFormat) -> Result<bool> {
    let report = validate(index);

    match format {
        OutputFormat::Text => TextFormatter::format_validation(&report),
        OutputFormat::Json | OutputFormat::Jsonl => JsonFormatter::format_value(&report, format)?,
        OutputFormat::Raw => {
            for diagnostic in &report.diagnostics {
                println!("{}", diagnostic.message);
            }
        },
    }
    Ok(report.is_ok(strict))
}
