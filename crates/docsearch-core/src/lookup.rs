//! Fuzzy lookup of documented symbols by name.

use crate::{DocIndex, SymbolMatch};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// Score bonus that puts exact name matches ahead of every fuzzy match.
const EXACT_BONUS: i64 = 1_000_000;

/// Find symbol entries (`type`, `function`, `method`) whose title matches `name`.
///
/// A title matches exactly when it equals `name` case-insensitively, either
/// whole (`AbstractTrees.children`) or by its last dotted component
/// (`children`). Exact matches rank first, then skim fuzzy scores; ties keep
/// index order. Repeated `(title, location)` pairs are reported once.
pub fn lookup_symbols(index: &DocIndex, name: &str, limit: usize) -> Vec<SymbolMatch> {
    let name = name.trim();
    if name.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    let mut matches: Vec<SymbolMatch> = index
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.category.is_symbol())
        .filter(|(_, entry)| seen.insert((entry.title.as_str(), entry.location.as_str())))
        .filter_map(|(ordinal, entry)| {
            let fuzzy = matcher.fuzzy_match(&entry.title, name)?;
            let exact = entry.title.eq_ignore_ascii_case(name)
                || short_name(&entry.title).eq_ignore_ascii_case(name);
            Some(SymbolMatch {
                ordinal,
                title: entry.title.clone(),
                location: entry.location.clone(),
                category: entry.category.clone(),
                score: if exact { fuzzy + EXACT_BONUS } else { fuzzy },
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.ordinal.cmp(&b.ordinal)));
    matches.truncate(limit);
    matches
}

/// Last component of a qualified name: `AbstractTrees.children` -> `children`.
fn short_name(title: &str) -> &str {
    title.rsplit('.').next().unwrap_or(title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use crate::doc_index::tests::{entry, sample_index};

    #[test]
    fn test_exact_short_name_ranks_first() {
        let matches = lookup_symbols(&sample_index(), "children", 10);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].title, "AbstractTrees.children");
        assert_eq!(matches[0].category, Category::Function);
        assert!(matches[0].score >= EXACT_BONUS);
    }

    #[test]
    fn test_fuzzy_abbreviation() {
        let matches = lookup_symbols(&sample_index(), "predfs", 10);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "AbstractTrees.PreOrderDFS");
        assert!(matches[0].score < EXACT_BONUS);
    }

    #[test]
    fn test_ignores_prose_entries() {
        let matches = lookup_symbols(&sample_index(), "Iteration", 10);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_limit_and_empty_name() {
        assert_eq!(lookup_symbols(&sample_index(), "children", 1).len(), 1);
        assert!(lookup_symbols(&sample_index(), "  ", 10).is_empty());
        assert!(lookup_symbols(&sample_index(), "children", 0).is_empty());
    }

    #[test]
    fn test_duplicate_symbol_entries_reported_once() {
        let index = DocIndex::from_entries(vec![
            entry("api/#f", "API", "f", "first", "function"),
            entry("api/#f", "API", "f", "second", "function"),
        ]);
        let matches = lookup_symbols(&index, "f", 10);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].ordinal, 0);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("AbstractTrees.children"), "children");
        assert_eq!(short_name("plain"), "plain");
    }
}
