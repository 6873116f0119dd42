//! The loaded, immutable collection of index entries.

use crate::{Category, Diagnostic, DocEntry, Location};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// An insertion-ordered, read-only view of a search index.
///
/// Entries keep the order they had in the source file. `location` is not
/// unique: a page's prose paragraphs, its sections and the symbols documented
/// on it often share a location or a location path.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    entries: Vec<DocEntry>,
    /// Position of each entry in the source `docs` array; empty means identity.
    positions: Vec<usize>,
    diagnostics: Vec<Diagnostic>,
    sha256: String,
}

/// One documentation page, aggregated from every entry under its path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// Location path shared by the page's entries.
    pub path: String,
    /// Page title from the first entry seen for the path.
    pub page: String,
    pub entries: usize,
    pub sections: usize,
    pub symbols: usize,
    pub text_bytes: usize,
}

/// Aggregate counts over a whole index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub total_entries: usize,
    /// Entry counts keyed by category tag.
    pub categories: BTreeMap<String, usize>,
    pub distinct_locations: usize,
    pub distinct_pages: usize,
    pub empty_text_entries: usize,
    /// Number of locations used by more than one entry.
    pub duplicate_locations: usize,
    pub total_text_bytes: usize,
    pub skipped_entries: usize,
    pub sha256: String,
}

impl DocIndex {
    pub const fn new(entries: Vec<DocEntry>, diagnostics: Vec<Diagnostic>, sha256: String) -> Self {
        Self {
            entries,
            positions: Vec::new(),
            diagnostics,
            sha256,
        }
    }

    /// Build an index from entries with no load history.
    pub fn from_entries(entries: Vec<DocEntry>) -> Self {
        Self::new(entries, Vec::new(), String::new())
    }

    /// Record where each entry sat in the source `docs` array.
    ///
    /// Ignored unless there is exactly one position per entry.
    #[must_use]
    pub fn with_positions(mut self, positions: Vec<usize>) -> Self {
        if positions.len() == self.entries.len() {
            self.positions = positions;
        }
        self
    }

    /// Position of the entry at `ordinal` in the source `docs` array.
    ///
    /// Differs from `ordinal` once malformed elements have been skipped.
    pub fn source_position(&self, ordinal: usize) -> usize {
        self.positions.get(ordinal).copied().unwrap_or(ordinal)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocEntry> {
        self.entries.iter()
    }

    pub fn get(&self, ordinal: usize) -> Option<&DocEntry> {
        self.entries.get(ordinal)
    }

    /// Problems found while loading (skipped entries).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Checksum of the text the index was parsed from; empty when built in memory.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Entries at a location, with their ordinals.
    ///
    /// A query with an anchor (`api/#Foo`) matches that exact location. A
    /// query without one (`api/`) matches every entry whose location path is
    /// `api/`, anchored or not. A leading `/` on the query is ignored.
    pub fn by_location(&self, query: &str) -> Vec<(usize, &DocEntry)> {
        let query = query.trim_start_matches('/');
        let wanted = Location::parse(query);

        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                let loc = Location::parse(entry.location.trim_start_matches('/'));
                match wanted.anchor {
                    Some(_) => loc == wanted,
                    None => loc.path == wanted.path,
                }
            })
            .collect()
    }

    /// Entries of one category, with their ordinals.
    pub fn by_category<'a>(
        &'a self,
        category: &'a Category,
    ) -> impl Iterator<Item = (usize, &'a DocEntry)> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, entry)| &entry.category == category)
    }

    /// One summary per location path, in order of first appearance.
    pub fn pages(&self) -> Vec<PageSummary> {
        let mut pages: Vec<PageSummary> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for entry in &self.entries {
            let path = Location::parse(&entry.location).path;
            let pos = *positions.entry(path).or_insert_with(|| {
                pages.push(PageSummary {
                    path: path.to_string(),
                    page: entry.page.clone(),
                    entries: 0,
                    sections: 0,
                    symbols: 0,
                    text_bytes: 0,
                });
                pages.len() - 1
            });

            let summary = &mut pages[pos];
            summary.entries += 1;
            summary.text_bytes += entry.text.len();
            if entry.category == Category::Section {
                summary.sections += 1;
            }
            if entry.category.is_symbol() {
                summary.symbols += 1;
            }
        }

        pages
    }

    pub fn stats(&self) -> IndexStats {
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        let mut location_counts: HashMap<&str, usize> = HashMap::new();
        let mut page_paths: HashSet<&str> = HashSet::new();
        let mut empty_text_entries = 0;
        let mut total_text_bytes = 0;

        for entry in &self.entries {
            *categories.entry(entry.category.to_string()).or_default() += 1;
            *location_counts.entry(entry.location.as_str()).or_default() += 1;
            page_paths.insert(Location::parse(&entry.location).path);
            if entry.text.is_empty() {
                empty_text_entries += 1;
            }
            total_text_bytes += entry.text.len();
        }

        IndexStats {
            total_entries: self.entries.len(),
            categories,
            distinct_locations: location_counts.len(),
            distinct_pages: page_paths.len(),
            empty_text_entries,
            duplicate_locations: location_counts.values().filter(|count| **count > 1).count(),
            total_text_bytes,
            skipped_entries: self.diagnostics.iter().filter(|d| d.entry.is_some()).count(),
            sha256: self.sha256.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a DocIndex {
    type Item = &'a DocEntry;
    type IntoIter = std::slice::Iter<'a, DocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
