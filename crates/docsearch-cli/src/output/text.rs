//! Text output formatting

use colored::{ColoredString, Colorize};
use docsearch_core::{
    CachedSource, Category, DiagnosticSeverity, DocEntry, IndexStats, PageSummary, SearchHit,
    SymbolMatch, ValidationReport, ValidationStatus,
};

const SNIPPET_INDENT: &str = "    ";

pub struct TextFormatter;

impl TextFormatter {
    pub fn format_search_results(query: &str, hits: &[SearchHit]) {
        if hits.is_empty() {
            println!("No results found for '{query}'");
            return;
        }

        for (idx, hit) in hits.iter().enumerate() {
            println!(
                "{:>3}. {} {} {}",
                idx + 1,
                hit.title.bold(),
                category_label(&hit.category),
                format!("{:.2}", hit.score).dimmed()
            );
            println!("{SNIPPET_INDENT}{} {}", display_location(&hit.location).cyan(), hit.page.dimmed());
            if !hit.snippet.is_empty() {
                println!("{SNIPPET_INDENT}{}", hit.snippet);
            }
        }
        println!(
            "\n{}",
            format!("{} result{}", hits.len(), plural(hits.len())).dimmed()
        );
    }

    pub fn format_symbols(name: &str, matches: &[SymbolMatch]) {
        if matches.is_empty() {
            println!("No symbols matching '{name}'");
            return;
        }

        let width = matches.iter().map(|m| m.title.len()).max().unwrap_or(0);
        for m in matches {
            println!(
                "{}  {}  {}",
                format!("{:<width$}", m.title).bold(),
                category_label(&m.category),
                display_location(&m.location).cyan(),
            );
        }
    }

    pub fn format_entries(entries: &[(usize, &DocEntry)], url: Option<&str>) {
        for (ordinal, entry) in entries {
            println!(
                "{} {} {}",
                format!("#{ordinal}").dimmed(),
                entry.title.bold(),
                category_label(&entry.category)
            );
            println!("{SNIPPET_INDENT}{} {}", display_location(&entry.location).cyan(), entry.page.dimmed());
            if entry.text.is_empty() {
                println!("{SNIPPET_INDENT}{}", "(no text)".dimmed());
            } else {
                println!("{SNIPPET_INDENT}{}", entry.text);
            }
        }
        if let Some(url) = url {
            println!("\n{}", url.underline());
        }
    }

    pub fn format_pages(pages: &[PageSummary]) {
        let width = pages
            .iter()
            .map(|p| display_location(&p.path).len())
            .max()
            .unwrap_or(0);
        for page in pages {
            println!(
                "{}  {}  {}",
                format!("{:<width$}", display_location(&page.path)).cyan(),
                page.page.bold(),
                format!(
                    "{} entries, {} sections, {} symbols",
                    page.entries, page.sections, page.symbols
                )
                .dimmed()
            );
        }
    }

    pub fn format_stats(stats: &IndexStats) {
        println!("{}", "Index statistics".bold());
        println!("  Entries:             {}", stats.total_entries);
        for (category, count) in &stats.categories {
            println!("    {category:<17} {count}");
        }
        println!("  Pages:               {}", stats.distinct_pages);
        println!("  Distinct locations:  {}", stats.distinct_locations);
        println!("  Shared locations:    {}", stats.duplicate_locations);
        println!("  Empty text:          {}", stats.empty_text_entries);
        println!("  Text bytes:          {}", stats.total_text_bytes);
        if stats.skipped_entries > 0 {
            println!(
                "  Skipped entries:     {}",
                stats.skipped_entries.to_string().yellow()
            );
        }
        println!("  SHA-256:             {}", stats.sha256.dimmed());
    }

    pub fn format_validation(report: &ValidationReport) {
        let status = match report.status {
            ValidationStatus::Healthy => "healthy".green(),
            ValidationStatus::Warning => "warnings".yellow(),
            ValidationStatus::Error => "errors".red(),
        };
        println!("{} entries: {}", report.entries, status.bold());

        for diagnostic in &report.diagnostics {
            let label = match diagnostic.severity {
                DiagnosticSeverity::Error => "error".red(),
                DiagnosticSeverity::Warn => "warn".yellow(),
                DiagnosticSeverity::Info => "info".blue(),
            };
            match diagnostic.entry {
                Some(entry) => println!("  {label}: {} (entry {entry})", diagnostic.message),
                None => println!("  {label}: {}", diagnostic.message),
            }
        }
    }

    pub fn format_cache_list(sources: &[CachedSource]) {
        if sources.is_empty() {
            println!("No cached indexes");
            return;
        }
        for source in sources {
            println!(
                "{}  {}",
                source.url.cyan(),
                format!("fetched {}", source.fetched_at.format("%Y-%m-%d %H:%M UTC")).dimmed()
            );
        }
    }
}

fn category_label(category: &Category) -> ColoredString {
    let label = format!("[{category}]");
    match category {
        Category::Page | Category::Section => label.dimmed(),
        Category::Type => label.magenta(),
        Category::Function | Category::Method => label.green(),
        Category::Other(_) => label.yellow(),
    }
}

/// The home page has an empty location; show it as `/`.
pub fn display_location(location: &str) -> &str {
    if location.is_empty() { "/" } else { location }
}

const fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
