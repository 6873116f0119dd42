use crate::text::extract_snippet;
use crate::{Category, DocIndex, Error, Result, SearchHit};
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, STORED, STRING, Schema, TEXT, Value};
use tantivy::{Index, IndexReader, ReloadPolicy, TantivyDocument, doc};
use tracing::{debug, info};

const WRITER_HEAP_BYTES: usize = 50_000_000;
const DEFAULT_SNIPPET_CHARS: usize = 160;
const DEFAULT_TITLE_BOOST: f32 = 2.0;

/// Parameters of a full-text query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    /// Restrict hits to these categories; empty means all.
    pub categories: Vec<Category>,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            categories: Vec::new(),
            limit,
        }
    }

    #[must_use]
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }
}

/// Full-text index over the entries of a [`DocIndex`].
pub struct SearchIndex {
    index: Index,
    title_field: Field,
    page_field: Field,
    text_field: Field,
    location_field: Field,
    category_field: Field,
    ordinal_field: Field,
    reader: IndexReader,
    title_boost: f32,
    snippet_chars: usize,
}

impl SearchIndex {
    fn schema() -> Schema {
        let mut schema_builder = Schema::builder();
        schema_builder.add_text_field("title", TEXT | STORED);
        schema_builder.add_text_field("page", TEXT | STORED);
        schema_builder.add_text_field("text", TEXT | STORED);
        schema_builder.add_text_field("location", STRING | STORED);
        schema_builder.add_text_field("category", STRING | STORED);
        schema_builder.add_u64_field("ordinal", STORED);
        schema_builder.build()
    }

    /// Create an index held entirely in memory.
    pub fn in_memory() -> Result<Self> {
        Self::from_index(Index::create_in_ram(Self::schema()))
    }

    /// Create a persistent index in `index_path`, creating the directory.
    pub fn create(index_path: &Path) -> Result<Self> {
        std::fs::create_dir_all(index_path)
            .map_err(|e| Error::Index(format!("Failed to create index directory: {e}")))?;

        let index = Index::create_in_dir(index_path, Self::schema())
            .map_err(|e| Error::Index(format!("Failed to create index: {e}")))?;

        Self::from_index(index)
    }

    /// Open a persistent index previously built with [`SearchIndex::create`].
    pub fn open(index_path: &Path) -> Result<Self> {
        let index = Index::open_in_dir(index_path)
            .map_err(|e| Error::Index(format!("Failed to open index: {e}")))?;

        Self::from_index(index)
    }

    fn from_index(index: Index) -> Result<Self> {
        let schema = index.schema();
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|_| Error::Index(format!("Missing {name} field")))
        };

        let title_field = field("title")?;
        let page_field = field("page")?;
        let text_field = field("text")?;
        let location_field = field("location")?;
        let category_field = field("category")?;
        let ordinal_field = field("ordinal")?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| Error::Index(format!("Failed to create reader: {e}")))?;

        Ok(Self {
            index,
            title_field,
            page_field,
            text_field,
            location_field,
            category_field,
            ordinal_field,
            reader,
            title_boost: DEFAULT_TITLE_BOOST,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        })
    }

    #[must_use]
    pub const fn with_title_boost(mut self, boost: f32) -> Self {
        self.title_boost = boost;
        self
    }

    #[must_use]
    pub const fn with_snippet_chars(mut self, chars: usize) -> Self {
        self.snippet_chars = chars;
        self
    }

    /// Number of documents visible to searches.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Replace the indexed contents with every entry of `docs`.
    pub fn index_entries(&mut self, docs: &DocIndex) -> Result<()> {
        let mut writer = self
            .index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| Error::Index(format!("Failed to create writer: {e}")))?;

        writer
            .delete_all_documents()
            .map_err(|e| Error::Index(format!("Failed to clear index: {e}")))?;

        let mut total_text_bytes = 0usize;
        for (ordinal, entry) in docs.iter().enumerate() {
            total_text_bytes += entry.text.len();
            let doc = doc!(
                self.title_field => entry.title.as_str(),
                self.page_field => entry.page.as_str(),
                self.text_field => entry.text.as_str(),
                self.location_field => entry.location.as_str(),
                self.category_field => entry.category.as_str(),
                self.ordinal_field => ordinal as u64
            );
            writer
                .add_document(doc)
                .map_err(|e| Error::Index(format!("Failed to add document: {e}")))?;
        }

        writer
            .commit()
            .map_err(|e| Error::Index(format!("Failed to commit: {e}")))?;

        self.reader
            .reload()
            .map_err(|e| Error::Index(format!("Failed to reload reader: {e}")))?;

        info!(
            "Indexed {} entries ({} bytes of text)",
            docs.len(),
            total_text_bytes
        );
        Ok(())
    }

    /// Run a query; hits come back by descending score, ties by ordinal.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        let sanitized = sanitize_query(&query.text);
        if !has_terms(&sanitized) || query.limit == 0 {
            return Ok(Vec::new());
        }

        let full_query_str = if query.categories.is_empty() {
            sanitized
        } else {
            let filter = query
                .categories
                .iter()
                .map(|c| format!("category:\"{}\"", c.as_str().replace('"', "\\\"")))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("({filter}) AND ({sanitized})")
        };

        let searcher = self.reader.searcher();
        let mut query_parser = QueryParser::for_index(
            &self.index,
            vec![self.title_field, self.page_field, self.text_field],
        );
        query_parser.set_field_boost(self.title_field, self.title_boost);

        let parsed = match query_parser.parse_query(&full_query_str) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Strict parse of '{}' failed ({}); parsing leniently", full_query_str, e);
                query_parser.parse_query_lenient(&full_query_str).0
            },
        };

        let top_docs = searcher
            .search(&parsed, &TopDocs::with_limit(query.limit))
            .map_err(|e| Error::Index(format!("Search failed: {e}")))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(doc_address)
                .map_err(|e| Error::Index(format!("Failed to retrieve doc: {e}")))?;

            let ordinal = doc
                .get_first(self.ordinal_field)
                .and_then(|v| v.as_u64())
                .ok_or_else(|| Error::Index("Field not found in document".into()))?;
            let text = self.get_field_text(&doc, self.text_field)?;

            hits.push(SearchHit {
                ordinal: usize::try_from(ordinal)
                    .map_err(|_| Error::Index(format!("Ordinal {ordinal} out of range")))?,
                location: self.get_field_text(&doc, self.location_field)?,
                page: self.get_field_text(&doc, self.page_field)?,
                title: self.get_field_text(&doc, self.title_field)?,
                category: Category::from(self.get_field_text(&doc, self.category_field)?),
                snippet: extract_snippet(&text, &query.text, self.snippet_chars),
                score,
            });
        }

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });

        debug!("Found {} hits for query '{}'", hits.len(), query.text);
        Ok(hits)
    }

    fn get_field_text(&self, doc: &TantivyDocument, field: Field) -> Result<String> {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .map(std::string::ToString::to_string)
            .ok_or_else(|| Error::Index("Field not found in document".into()))
    }
}

/// Characters with meaning in the query grammar.
const QUERY_SYNTAX: &[char] = &[
    '\\', '(', ')', '[', ']', '{', '}', '^', '~', ':', '+', '-', '!', '*', '\'', '<', '>', '=',
    '`',
];

/// Reserved words of the query grammar; only the upper-case forms are operators.
const QUERY_OPERATORS: [&str; 4] = ["AND", "OR", "NOT", "IN"];

/// Reduce arbitrary text (including Julia signatures such as `f(::Type{T})`
/// and backticked code) to plain terms. Double-quoted phrases are kept;
/// operator words are lower-cased so they search as ordinary words.
fn sanitize_query(query: &str) -> String {
    let blanked: String = query
        .chars()
        .map(|ch| if QUERY_SYNTAX.contains(&ch) { ' ' } else { ch })
        .collect();

    // An unbalanced quote would open a phrase that never closes.
    let blanked = if blanked.matches('"').count() % 2 == 1 {
        blanked.replace('"', " ")
    } else {
        blanked
    };

    blanked
        .split_whitespace()
        .map(|word| {
            if QUERY_OPERATORS.contains(&word) {
                word.to_ascii_lowercase()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the tokenizer will find at least one term in `query`.
fn has_terms(query: &str) -> bool {
    query.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::doc_index::tests::sample_index;
    use tempfile::TempDir;

    fn built_index() -> SearchIndex {
        let mut index = SearchIndex::in_memory().expect("Should create index");
        index
            .index_entries(&sample_index())
            .expect("Should index entries");
        index
    }

    #[test]
    fn test_index_and_search_basic() {
        let index = built_index();
        assert_eq!(index.num_docs(), 8);

        let hits = index.search(&SearchQuery::new("pre-order", 10)).expect("Should search");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].title, "AbstractTrees.PreOrderDFS");
        assert_eq!(hits[0].category, Category::Type);
        assert_eq!(hits[0].ordinal, 5);
    }

    #[test]
    fn test_search_no_results() {
        let index = built_index();
        let hits = index
            .search(&SearchQuery::new("nonexistentterm12345", 10))
            .expect("Should search");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let index = built_index();
        assert!(index.search(&SearchQuery::new("   ", 10)).unwrap().is_empty());
        assert!(index.search(&SearchQuery::new("::", 10)).unwrap().is_empty());
    }

    #[test]
    fn test_search_limit() {
        let index = built_index();
        let hits = index.search(&SearchQuery::new("children", 1)).unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_category_filter() {
        let index = built_index();
        let query = SearchQuery::new("children", 10).with_categories(vec![Category::Method]);
        let hits = index.search(&query).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, Category::Method);

        let query = SearchQuery::new("children", 10)
            .with_categories(vec![Category::Method, Category::Function]);
        assert_eq!(index.search(&query).unwrap().len(), 2);
    }

    #[test]
    fn test_results_ordered_by_score() {
        let index = built_index();
        let hits = index.search(&SearchQuery::new("trees nodes", 10)).unwrap();
        assert!(hits.len() > 1);
        for pair in hits.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_julia_signature_query_parses() {
        let index = built_index();
        let hits = index
            .search(&SearchQuery::new("children(node::Any)", 10))
            .expect("Signature syntax should be escaped");
        assert!(hits.iter().any(|h| h.category == Category::Method));
    }

    #[test]
    fn test_snippet_is_normalized() {
        let index = built_index();
        let hits = index.search(&SearchQuery::new("fallback", 10)).unwrap();
        assert_eq!(hits[0].snippet, "children(node::Any) Fallback returning no children.");
    }

    #[test]
    fn test_reindex_replaces_contents() {
        let mut index = built_index();
        index.index_entries(&DocIndex::default()).unwrap();
        assert_eq!(index.num_docs(), 0);
    }

    #[test]
    fn test_persistent_index_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let index_path = temp_dir.path().join("test_index");

        let mut index = SearchIndex::create(&index_path).expect("Should create index");
        index.index_entries(&sample_index()).unwrap();
        drop(index);

        let reopened = SearchIndex::open(&index_path).expect("Should open index");
        let hits = reopened.search(&SearchQuery::new("children", 10)).unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_index_open_nonexistent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        assert!(SearchIndex::open(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_sanitize_query() {
        assert_eq!(sanitize_query("plain words"), "plain words");
        assert_eq!(sanitize_query("f(::T)"), "f T");
        assert_eq!(sanitize_query("\"exact phrase\""), "\"exact phrase\"");
        assert_eq!(sanitize_query("half \"open"), "half open");
        assert_eq!(sanitize_query("`children`"), "children");
        assert_eq!(sanitize_query("trees AND nodes OR NOT IN"), "trees and nodes or not in");
        assert_eq!(sanitize_query("ANDROID Or"), "ANDROID Or");
    }

    #[test]
    fn test_operator_words_are_plain_terms() {
        let index = built_index();
        for text in ["AND", "IN", "NOT", "children OR", "trees AND", "OR children"] {
            let result = index.search(&SearchQuery::new(text, 10));
            assert!(result.is_ok(), "query {text:?} failed: {result:?}");
        }
        let hits = index.search(&SearchQuery::new("children OR", 10)).unwrap();
        assert!(hits.iter().any(|h| h.title == "AbstractTrees.children"));
    }

    #[test]
    fn test_backticked_code_query() {
        let index = built_index();
        let hits = index.search(&SearchQuery::new("`children`", 10)).unwrap();
        assert!(hits.iter().any(|h| h.title == "AbstractTrees.children"));
    }

    #[test]
    fn test_termless_query_ignores_category_filter() {
        let index = built_index();
        for text in ["\"\"", "?", "#", "`", "   "] {
            let query =
                SearchQuery::new(text, 10).with_categories(vec![Category::Function, Category::Page]);
            assert!(index.search(&query).unwrap().is_empty(), "query {text:?} matched");
        }
    }
}
