//! Text helpers for presenting entry prose.

/// Collapse every whitespace run to a single space and trim the ends.
///
/// Symbol docstrings in generated indexes end with runs of blank lines and
/// code samples keep their newlines; neither is useful in a one-line hit.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract a window of `text` around the first match of any query term.
///
/// Matching is ASCII case-insensitive. The window keeps roughly `max_chars`
/// characters, is prefixed/suffixed with `...` when it does not reach the
/// ends of `text`, and always falls on UTF-8 character boundaries. Without a
/// match the leading `max_chars` characters are returned.
pub fn extract_snippet(text: &str, query: &str, max_chars: usize) -> String {
    let text = normalize_whitespace(text);
    let max_chars = max_chars.max(1);

    let hit = query
        .split_whitespace()
        .map(|term| term.trim_matches('"'))
        .filter(|term| !term.is_empty())
        .filter_map(|term| find_ignore_ascii_case(&text, term).map(|pos| (pos, term.len())))
        .min_by_key(|(pos, _)| *pos);

    let Some((pos, term_len)) = hit else {
        return truncate_chars(&text, max_chars);
    };

    // Byte offsets around the match, then snapped to char boundaries.
    let context = max_chars.saturating_sub(term_len) / 2;
    let byte_start = pos.saturating_sub(context);
    let byte_end = (pos + term_len + context).min(text.len());

    let start = floor_char_boundary(&text, byte_start);
    let end = ceil_char_boundary(&text, byte_end);

    let mut snippet = String::with_capacity(end - start + 6);
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&text[start..end]);
    if end < text.len() {
        snippet.push_str("...");
    }
    snippet
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((boundary, _)) => format!("{}...", &text[..boundary]),
        None => text.to_string(),
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .enumerate()
        .find(|(idx, window)| haystack.is_char_boundary(*idx) && window.eq_ignore_ascii_case(needle))
        .map(|(idx, _)| idx)
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_whitespace_strips_docstring_padding() {
        let text = "parenttype(csr::TreeCursor)\n\nThe return type of parent(csr).\n\n\n\n\n\n";
        assert_eq!(
            normalize_whitespace(text),
            "parenttype(csr::TreeCursor) The return type of parent(csr)."
        );
    }

    #[test]
    fn test_snippet_centers_on_match() {
        let text = format!("{} needle {}", "a".repeat(200), "b".repeat(200));
        let snippet = extract_snippet(&text, "needle", 40);
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        assert!(snippet.contains("needle"));
        assert!(snippet.len() < 60);
    }

    #[test]
    fn test_snippet_is_case_insensitive() {
        let snippet = extract_snippet("Iterators can be constructed for any tree", "ITERATORS", 100);
        assert_eq!(snippet, "Iterators can be constructed for any tree");
    }

    #[test]
    fn test_snippet_uses_earliest_term() {
        let text = format!("{} alpha {} beta", "x".repeat(100), "y".repeat(100));
        let snippet = extract_snippet(&text, "beta alpha", 20);
        assert!(snippet.contains("alpha"));
    }

    #[test]
    fn test_snippet_without_match_truncates() {
        let snippet = extract_snippet(&"z".repeat(50), "missing", 10);
        assert_eq!(snippet, format!("{}...", "z".repeat(10)));
    }

    #[test]
    fn test_snippet_of_empty_text() {
        assert_eq!(extract_snippet("", "anything", 10), "");
    }

    #[test]
    fn test_snippet_handles_multibyte_text() {
        let mut text = "🌳".repeat(30);
        text.push_str(" MARKER ");
        text.push_str(&"日本語".repeat(30));
        let snippet = extract_snippet(&text, "marker", 20);
        assert!(snippet.contains("MARKER"));
        assert!(snippet.chars().count() > 0);
    }

    proptest! {
        #[test]
        fn test_snippet_never_panics(text in "\\PC{0,200}", query in "\\PC{0,10}", max in 0usize..80) {
            let snippet = extract_snippet(&text, &query, max);
            prop_assert!(snippet.is_char_boundary(snippet.len()));
        }
    }
}
