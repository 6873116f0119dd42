use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of documentation record an entry describes.
///
/// Serialized as the lowercase tag the documentation generator writes.
/// Unrecognized tags are kept verbatim in [`Category::Other`] so that a
/// re-serialized index is byte-for-byte faithful to its input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Prose belonging to a whole page.
    Page,
    /// A heading inside a page.
    Section,
    /// A documented type.
    Type,
    /// A documented function.
    Function,
    /// A documented method of a function.
    Method,
    /// Any tag outside the fixed set.
    Other(String),
}

impl Category {
    /// The fixed set of tags a well-formed index uses.
    pub const KNOWN: [Self; 5] = [
        Self::Page,
        Self::Section,
        Self::Type,
        Self::Function,
        Self::Method,
    ];

    /// The tag as written in the index.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Type => "type",
            Self::Function => "function",
            Self::Method => "method",
            Self::Other(tag) => tag,
        }
    }

    /// Whether the entry documents an API symbol rather than prose.
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Type | Self::Function | Self::Method)
    }

    /// Whether the tag is one of [`Category::KNOWN`].
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "page" => Self::Page,
            "section" => Self::Section,
            "type" => Self::Type,
            "function" => Self::Function,
            "method" => Self::Method,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the search index: a page, a section, or an API symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Page path plus optional `#anchor`, relative to the site root.
    pub location: String,
    /// Human readable page title.
    pub page: String,
    /// Section or symbol title; repeats `page` for page prose.
    pub title: String,
    /// Extracted prose used for full-text search. May be empty.
    pub text: String,
    /// Kind of record.
    pub category: Category,
}

/// Serialized root of a search index: `{"docs": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexFile {
    /// Entries in generation order.
    pub docs: Vec<DocEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// Position of the offending element in `docs`, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<usize>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            entry: None,
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warn,
            message: message.into(),
            entry: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Info,
            message: message.into(),
            entry: None,
        }
    }

    #[must_use]
    pub const fn at(mut self, entry: usize) -> Self {
        self.entry = Some(entry);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the entry in the loaded index.
    pub ordinal: usize,
    pub location: String,
    pub page: String,
    pub title: String,
    pub category: Category,
    pub snippet: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub ordinal: usize,
    pub title: String,
    pub location: String,
    pub category: Category,
    pub score: i64,
}

/// Metadata stored next to a cached copy of a remote index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSource {
    pub url: String,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub sha256: String,
}
