//! Re-serialization of a loaded index.

use crate::{DocEntry, DocIndex, Result};
use serde::Serialize;

/// Variable name the documentation generator assigns the index to.
pub const SCRIPT_VARIABLE: &str = "documenterSearchIndex";

#[derive(Serialize)]
struct DocsRef<'a> {
    docs: &'a [DocEntry],
}

/// Serialize as `{"docs": [...]}`.
pub fn to_json(index: &DocIndex, pretty: bool) -> Result<String> {
    let root = DocsRef {
        docs: index.entries(),
    };
    let json = if pretty {
        serde_json::to_string_pretty(&root)?
    } else {
        serde_json::to_string(&root)?
    };
    Ok(json)
}

/// Serialize in the generator's script form, loadable by a browser `<script>` tag.
pub fn to_js(index: &DocIndex) -> Result<String> {
    let docs = serde_json::to_string(index.entries())?;
    Ok(format!("var {SCRIPT_VARIABLE} = {{\"docs\":\n{docs}\n}}\n"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::doc_index::tests::sample_index;
    use crate::{SearchIndexFile, parse_index};

    #[test]
    fn test_json_round_trip_preserves_order() {
        let index = sample_index();
        for pretty in [true, false] {
            let text = to_json(&index, pretty).unwrap();
            let back = parse_index(&text).unwrap();
            assert_eq!(back.entries(), index.entries());
        }
    }

    #[test]
    fn test_js_round_trip_preserves_order() {
        let index = sample_index();
        let text = to_js(&index).unwrap();
        assert!(text.starts_with("var documenterSearchIndex = {\"docs\":\n["));
        let back = parse_index(&text).unwrap();
        assert_eq!(back.entries(), index.entries());
    }

    #[test]
    fn test_json_matches_serde_root_type() {
        let index = sample_index();
        let text = to_json(&index, false).unwrap();
        let root: SearchIndexFile = serde_json::from_str(&text).unwrap();
        assert_eq!(root.docs, index.entries());
    }

    #[test]
    fn test_empty_index_serializes() {
        let index = DocIndex::default();
        assert_eq!(to_json(&index, false).unwrap(), r#"{"docs":[]}"#);
        assert!(parse_index(&to_js(&index).unwrap()).unwrap().is_empty());
    }
}
