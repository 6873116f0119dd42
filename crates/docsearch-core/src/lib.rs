//! # docsearch-core
//!
//! Core functionality for docsearch - a reader for the search indexes that
//! static documentation generators emit next to a built site
//! (`search_index.js`).
//!
//! An index is a flat, ordered list of records, one per page paragraph,
//! section heading or documented API symbol. This crate loads such a file
//! (from disk, a build directory, or the published site), checks its shape,
//! and answers full-text and symbol queries over it.
//!
//! ## Architecture
//!
//! - **Parsing**: lenient reader that skips malformed records with diagnostics
//! - **Model**: [`DocEntry`], [`Category`] and the ordered [`DocIndex`]
//! - **Search**: Tantivy full-text index and fuzzy symbol lookup
//! - **Sources**: paths, build directories and URLs, with an HTTP cache
//! - **Error Handling**: categorized [`Error`] values
//!
//! ## Quick Start
//!
//! ```rust
//! use docsearch_core::{SearchIndex, SearchQuery, parse_index, validate};
//!
//! let index = parse_index(
//!     r#"var documenterSearchIndex = {"docs":[
//!         {"location":"api/#Tree.children","page":"API","title":"Tree.children",
//!          "text":"children(node) returns the children of node","category":"function"}
//!     ]}"#,
//! )?;
//!
//! assert!(validate(&index).is_ok(false));
//!
//! let mut search = SearchIndex::in_memory()?;
//! search.index_entries(&index)?;
//! let hits = search.search(&SearchQuery::new("children", 5))?;
//! assert_eq!(hits[0].title, "Tree.children");
//! # Ok::<(), docsearch_core::Error>(())
//! ```

/// Configuration file handling
pub mod config;
/// The loaded entry collection
pub mod doc_index;
/// Error types and result aliases
pub mod error;
/// HTTP fetching with conditional requests support
pub mod fetcher;
/// Search index implementation using Tantivy
pub mod index;
/// Entry location parsing
pub mod location;
/// Fuzzy symbol lookup
pub mod lookup;
/// Lenient index parser
pub mod parser;
/// Index sources and loading
pub mod source;
/// Local cache for fetched indexes
pub mod storage;
/// Snippet and whitespace helpers
pub mod text;
/// Core data types and structures
pub mod types;
/// Index shape validation
pub mod validate;
/// Index re-serialization
pub mod writer;

// Re-export commonly used types
pub use config::{Config, FetchConfig, SearchConfig, SourceConfig};
pub use doc_index::{DocIndex, IndexStats, PageSummary};
pub use error::{Error, Result};
pub use fetcher::{FetchResult, Fetcher};
pub use index::{SearchIndex, SearchQuery};
pub use location::Location;
pub use lookup::lookup_symbols;
pub use parser::parse_index;
pub use source::{IndexSource, Loader};
pub use storage::Storage;
pub use types::*;
pub use validate::{ValidationReport, ValidationStatus, validate};
pub use writer::{to_js, to_json};
