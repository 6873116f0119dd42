use clap::{Args, ValueEnum};
use docsearch_core::Category;

use crate::output::OutputFormat;

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (text, json, jsonl, raw); defaults to text on a terminal, json when piped
    #[arg(short = 'f', long = "format", value_enum, env = "DOCSEARCH_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    pub json: bool,
}

impl FormatArg {
    /// Returns the effective output format.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        if self.json {
            return OutputFormat::Json;
        }
        self.format.unwrap_or_else(OutputFormat::detect)
    }
}

/// Category names accepted by `--category`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Page,
    Section,
    Type,
    Function,
    Method,
    /// Shorthand for type, function and method
    Symbol,
}

impl CategoryArg {
    /// Expand into index categories, without duplicates.
    pub fn expand(args: &[Self]) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for arg in args {
            let expanded: &[Category] = match arg {
                Self::Page => &[Category::Page],
                Self::Section => &[Category::Section],
                Self::Type => &[Category::Type],
                Self::Function => &[Category::Function],
                Self::Method => &[Category::Method],
                Self::Symbol => &[Category::Type, Category::Function, Category::Method],
            };
            for category in expanded {
                if !categories.contains(category) {
                    categories.push(category.clone());
                }
            }
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_format_wins() {
        let arg = FormatArg {
            format: Some(OutputFormat::Jsonl),
            json: false,
        };
        assert_eq!(arg.resolve(), OutputFormat::Jsonl);
    }

    #[test]
    fn test_json_shorthand() {
        let arg = FormatArg {
            format: None,
            json: true,
        };
        assert_eq!(arg.resolve(), OutputFormat::Json);
    }

    #[test]
    fn test_expand_symbol_dedupes() {
        let categories = CategoryArg::expand(&[CategoryArg::Function, CategoryArg::Symbol]);
        assert_eq!(
            categories,
            vec![Category::Function, Category::Type, Category::Method]
        );
    }

    #[test]
    fn test_expand_empty() {
        assert!(CategoryArg::expand(&[]).is_empty());
    }
}
