//! Shape checks for a loaded index.

use crate::{Category, Diagnostic, DiagnosticSeverity, DocIndex, parse_index, to_json};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Healthy,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub status: ValidationStatus,
    pub entries: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Whether the index passes; `strict` also fails on warnings.
    pub fn is_ok(&self, strict: bool) -> bool {
        match self.status {
            ValidationStatus::Healthy => true,
            ValidationStatus::Warning => !strict,
            ValidationStatus::Error => false,
        }
    }

    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == severity).count()
    }
}

/// Check a loaded index against the expectations of a search consumer.
///
/// Errors: no entries, or a serialize/parse round trip that changes the
/// entry sequence. Warnings: entries skipped while loading, categories
/// outside the fixed set, blank locations on non-page entries. Empty text and
/// shared locations are legitimate and only reported as info.
pub fn validate(index: &DocIndex) -> ValidationReport {
    let mut diagnostics: Vec<Diagnostic> = index.diagnostics().to_vec();

    if index.is_empty() {
        diagnostics.push(Diagnostic::error("Index contains no entries"));
    }

    match to_json(index, false).and_then(|text| parse_index(&text)) {
        Ok(reparsed) if reparsed.entries() == index.entries() => {},
        Ok(_) => diagnostics.push(Diagnostic::error(
            "Serialize/parse round trip changed the entry sequence",
        )),
        Err(e) => diagnostics.push(Diagnostic::error(format!("Round trip failed: {e}"))),
    }

    let mut empty_text = 0usize;
    let mut location_counts: HashMap<&str, usize> = HashMap::new();

    for (ordinal, entry) in index.iter().enumerate() {
        if let Category::Other(tag) = &entry.category {
            diagnostics.push(
                Diagnostic::warn(format!("Unknown category '{tag}'")).at(index.source_position(ordinal)),
            );
        }
        if entry.location.trim().is_empty() && entry.category != Category::Page {
            diagnostics.push(
                Diagnostic::warn(format!("Blank location on {} entry '{}'", entry.category, entry.title))
                    .at(index.source_position(ordinal)),
            );
        }
        if entry.text.is_empty() {
            empty_text += 1;
        }
        *location_counts.entry(entry.location.as_str()).or_default() += 1;
    }

    if empty_text > 0 {
        diagnostics.push(Diagnostic::info(format!("{empty_text} entries have empty text")));
    }

    let shared = location_counts.values().filter(|count| **count > 1).count();
    if shared > 0 {
        diagnostics.push(Diagnostic::info(format!(
            "{shared} locations are shared by more than one entry"
        )));
    }

    let status = match diagnostics.iter().map(|d| d.severity).max() {
        Some(DiagnosticSeverity::Error) => ValidationStatus::Error,
        Some(DiagnosticSeverity::Warn) => ValidationStatus::Warning,
        _ => ValidationStatus::Healthy,
    };

    ValidationReport {
        status,
        entries: index.len(),
        diagnostics,
    }
}
