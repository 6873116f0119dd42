//! Resolving where an index lives and loading it.

use crate::{CachedSource, Config, DocIndex, Error, FetchResult, Fetcher, Result, Storage, parse_index};
use chrono::Utc;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// File names probed, in order, when a source points at a build directory.
pub const INDEX_FILE_CANDIDATES: [&str; 3] = [
    "search_index.js",
    "search_index.json",
    "search/search_index.js",
];

/// A search index location as given by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    /// A file, or a documentation build directory containing one.
    Path(PathBuf),
    /// A published index, or the site directory that serves one.
    Url(Url),
}

impl IndexSource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::NotFound("No index source given".into()));
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let mut url = Url::parse(raw)?;
            if url.path().ends_with('/') {
                url = url.join(INDEX_FILE_CANDIDATES[0])?;
            }
            Ok(Self::Url(url))
        } else {
            Ok(Self::Path(PathBuf::from(raw)))
        }
    }

    /// Resolve a directory path to the index file inside it.
    pub fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }

        if path.is_dir() {
            return INDEX_FILE_CANDIDATES
                .iter()
                .map(|candidate| path.join(candidate))
                .find(|candidate| candidate.is_file())
                .ok_or_else(|| {
                    Error::NotFound(format!(
                        "No search index in '{}' (looked for {})",
                        path.display(),
                        INDEX_FILE_CANDIDATES.join(", ")
                    ))
                });
        }

        Err(Error::NotFound(format!("'{}' does not exist", path.display())))
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Loads indexes from disk or HTTP, using the local cache for URLs.
pub struct Loader {
    config: Config,
    storage: Option<Storage>,
    offline: bool,
}

impl Loader {
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            storage: None,
            offline: false,
        }
    }

    /// Cache fetched indexes in `storage`.
    #[must_use]
    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Never touch the network; URL sources must already be cached.
    #[must_use]
    pub const fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub async fn load(&self, source: &IndexSource) -> Result<DocIndex> {
        let index = match source {
            IndexSource::Path(path) => {
                let file = IndexSource::resolve_path(path)?;
                debug!("Reading index from {}", file.display());
                parse_index(&tokio::fs::read_to_string(&file).await?)?
            },
            IndexSource::Url(url) => self.load_remote(url).await?,
        };

        info!("Loaded {} entries from {}", index.len(), source);
        Ok(index)
    }

    /// Fetch a published index, revalidating any cached copy.
    ///
    /// A fetched body only replaces the cached copy once it parses; when it
    /// does not, or the fetch fails recoverably, the cached copy is served.
    async fn load_remote(&self, url: &Url) -> Result<DocIndex> {
        let url = url.as_str();
        let cached = match &self.storage {
            Some(storage) => storage.load_metadata(url)?,
            None => None,
        };
        let fallback = self.storage.as_ref().filter(|_| cached.is_some());

        if self.offline {
            return match fallback {
                Some(storage) => parse_index(&storage.load_content(url)?),
                None => Err(Error::NotFound(format!(
                    "'{url}' is not cached and offline mode is on"
                ))),
            };
        }

        let fetcher = Fetcher::from_config(&self.config.fetch)?;
        let result = fetcher
            .fetch_with_cache(
                url,
                cached.as_ref().and_then(|c| c.etag.as_deref()),
                cached.as_ref().and_then(|c| c.last_modified.as_deref()),
            )
            .await;

        match (result, fallback) {
            (Ok(FetchResult::Modified {
                content,
                etag,
                last_modified,
                sha256,
            }), fallback) => match parse_index(&content) {
                Ok(index) => {
                    if let Some(storage) = &self.storage {
                        let metadata = CachedSource {
                            url: url.to_string(),
                            etag,
                            last_modified,
                            fetched_at: Utc::now(),
                            sha256,
                        };
                        if let Err(e) = storage.save(&metadata, &content) {
                            warn!("Could not cache index for {}: {}", url, e);
                        }
                    }
                    Ok(index)
                },
                Err(e) => match fallback {
                    Some(storage) => {
                        warn!("Fetched index for {} is unreadable ({}); using cached copy", url, e);
                        parse_index(&storage.load_content(url)?)
                    },
                    None => Err(e),
                },
            },
            (Ok(FetchResult::NotModified { .. }), Some(storage)) => {
                debug!("Using cached index for {}", url);
                parse_index(&storage.load_content(url)?)
            },
            (Ok(FetchResult::NotModified { .. }), None) => parse_index(&fetcher.fetch(url).await?),
            (Err(e), Some(storage)) if e.is_recoverable() => {
                warn!("Fetching {} failed ({}); using cached copy", url, e);
                parse_index(&storage.load_content(url)?)
            },
            (Err(e), _) => Err(e),
        }
    }
}
