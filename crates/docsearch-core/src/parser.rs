//! Lenient reader for generated search index files.
//!
//! Two input forms are accepted:
//!
//! - plain JSON: `{"docs": [...]}`
//! - the script form emitted by the documentation generator:
//!   `var documenterSearchIndex = {"docs": [...]}`
//!
//! The top-level shape is strict; individual entries are not. An element of
//! `docs` that cannot be read as a [`DocEntry`] is skipped and reported as a
//! warning diagnostic, so a partially stale index still loads.

use crate::{DocEntry, DocIndex, Diagnostic, Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Parse index text into a [`DocIndex`].
///
/// ```rust
/// use docsearch_core::parse_index;
///
/// let index = parse_index(
///     r#"var documenterSearchIndex = {"docs":[
///         {"location":"","page":"Home","title":"Home","text":"hi","category":"page"},
///         {"location":"x/","page":"X"}
///     ]}"#,
/// )?;
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.diagnostics().len(), 1);
/// # Ok::<(), docsearch_core::Error>(())
/// ```
pub fn parse_index(text: &str) -> Result<DocIndex> {
    let json = strip_script_wrapper(text);

    let root: Value = serde_json::from_str(json)
        .map_err(|e| Error::Parse(format!("Index is not valid JSON: {e}")))?;

    let mut root = match root {
        Value::Object(map) => map,
        other => {
            return Err(Error::Parse(format!(
                "Index root must be an object, found {}",
                kind_of(&other)
            )));
        },
    };

    let docs = root
        .remove("docs")
        .ok_or_else(|| Error::Parse("Index root has no `docs` field".into()))?;

    let elements = match docs {
        Value::Array(elements) => elements,
        other => {
            return Err(Error::Parse(format!(
                "`docs` must be an array, found {}",
                kind_of(&other)
            )));
        },
    };

    let total = elements.len();
    let mut entries = Vec::with_capacity(total);
    let mut positions = Vec::with_capacity(total);
    let mut diagnostics = Vec::new();

    for (idx, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<DocEntry>(element) {
            Ok(entry) => {
                entries.push(entry);
                positions.push(idx);
            },
            Err(e) => {
                warn!("Skipping malformed entry {idx}: {e}");
                diagnostics.push(Diagnostic::warn(format!("Skipped malformed entry: {e}")).at(idx));
            },
        }
    }

    debug!(
        "Parsed {} of {} entries ({} skipped)",
        entries.len(),
        total,
        total - entries.len()
    );

    Ok(DocIndex::new(entries, diagnostics, content_sha256(text)).with_positions(positions))
}

/// Base64-encoded SHA-256 of the raw index text.
pub fn content_sha256(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    STANDARD.encode(hasher.finalize())
}

/// Return the JSON payload of `var <name> = <json>;`, or `text` unchanged.
fn strip_script_wrapper(text: &str) -> &str {
    let trimmed = text.trim_start_matches('\u{feff}').trim();

    let Some(rest) = ["var ", "const ", "let "]
        .iter()
        .find_map(|keyword| trimmed.strip_prefix(keyword))
    else {
        return trimmed;
    };

    let Some((name, payload)) = rest.split_once('=') else {
        return trimmed;
    };

    let name = name.trim();
    let is_identifier = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !is_identifier {
        return trimmed;
    }

    payload.trim().trim_end_matches(';').trim_end()
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::{Category, DiagnosticSeverity};

    const ENTRY: &str =
        r#"{"location":"iteration/","page":"Iteration","title":"Iteration","text":"CurrentModule = AbstractTrees","category":"page"}"#;

    #[test]
    fn test_parses_plain_json() {
        let index = parse_index(&format!(r#"{{"docs":[{ENTRY}]}}"#)).unwrap();
        assert_eq!(index.len(), 1);
        let entry = index.get(0).unwrap();
        assert_eq!(entry.location, "iteration/");
        assert_eq!(entry.category, Category::Page);
        assert!(index.diagnostics().is_empty());
    }

    #[test]
    fn test_parses_script_wrapper() {
        let text = format!("var documenterSearchIndex = {{\"docs\":\n[{ENTRY}]\n}}\n");
        let index = parse_index(&text).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_parses_script_wrapper_with_semicolon() {
        let text = format!("const searchIndex={{\"docs\":[{ENTRY}]}};\n");
        assert_eq!(parse_index(&text).unwrap().len(), 1);
    }

    #[test]
    fn test_wrapper_and_plain_forms_agree() {
        let plain = parse_index(&format!(r#"{{"docs":[{ENTRY},{ENTRY}]}}"#)).unwrap();
        let wrapped =
            parse_index(&format!("var documenterSearchIndex = {{\"docs\":[{ENTRY},{ENTRY}]}}")).unwrap();
        assert_eq!(plain.entries(), wrapped.entries());
    }

    #[test]
    fn test_rejects_non_json() {
        let err = parse_index("var x = not json").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_rejects_non_object_root() {
        let err = parse_index("[]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_rejects_missing_docs() {
        let err = parse_index(r#"{"entries":[]}"#).unwrap_err();
        assert!(err.to_string().contains("`docs`"));
    }

    #[test]
    fn test_rejects_non_array_docs() {
        let err = parse_index(r#"{"docs":{"a":1}}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_empty_docs_is_not_a_parse_error() {
        let index = parse_index(r#"{"docs":[]}"#).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_skips_malformed_entries_and_keeps_order() {
        let text = format!(
            r#"{{"docs":[
                {ENTRY},
                42,
                {{"location":"a/","page":"A","title":"A","text":"","category":"page"}},
                {{"location":"b/","page":"B","title":"B","category":"page"}},
                {{"location":"c/","page":"C","title":7,"text":"","category":"page"}},
                {{"location":"d/","page":"D","title":"D","text":"","category":"section","extra":true}}
            ]}}"#
        );
        let index = parse_index(&text).unwrap();

        let locations: Vec<&str> = index.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(locations, vec!["iteration/", "a/", "d/"]);

        let skipped: Vec<usize> = index.diagnostics().iter().filter_map(|d| d.entry).collect();
        assert_eq!(skipped, vec![1, 3, 4]);
        assert!(
            index
                .diagnostics()
                .iter()
                .all(|d| d.severity == DiagnosticSeverity::Warn)
        );
    }

    #[test]
    fn test_tolerates_markup_and_unicode() {
        let text = r#"{"docs":[{"location":"api/#Base.show","page":"API","title":"<b>show</b> ✓","text":"<code>print(io, x)</code> — ∀ nodes","category":"method"}]}"#;
        let index = parse_index(text).unwrap();
        assert_eq!(index.get(0).unwrap().title, "<b>show</b> ✓");
    }

    #[test]
    fn test_checksum_is_stable() {
        let text = format!(r#"{{"docs":[{ENTRY}]}}"#);
        assert_eq!(
            parse_index(&text).unwrap().sha256(),
            parse_index(&text).unwrap().sha256()
        );
        assert_ne!(content_sha256("a"), content_sha256("b"));
    }

    #[test]
    fn test_strip_wrapper_leaves_json_alone() {
        assert_eq!(strip_script_wrapper("  {\"docs\":[]}  "), "{\"docs\":[]}");
        assert_eq!(strip_script_wrapper("var = {}"), "var = {}");
    }
}
