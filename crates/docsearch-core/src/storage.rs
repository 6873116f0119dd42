use crate::{CachedSource, Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const INDEX_FILE: &str = "search_index.js";
const METADATA_FILE: &str = "metadata.json";
const MAX_KEY_LEN: usize = 120;

/// Local cache of search indexes fetched over HTTP.
///
/// Layout: `<root>/<key>/search_index.js` and `<root>/<key>/metadata.json`,
/// where `<key>` is derived from the URL.
pub struct Storage {
    root_dir: PathBuf,
}

impl Storage {
    /// Storage under `DOCSEARCH_DATA_DIR`, or the platform cache directory.
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var("DOCSEARCH_DATA_DIR") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Self::with_root(PathBuf::from(trimmed));
            }
        }

        let dirs = ProjectDirs::from("dev", "docsearch", "docsearch")
            .ok_or_else(|| Error::Storage("Failed to determine cache directory".into()))?;
        Self::with_root(dirs.cache_dir().join("indexes"))
    }

    pub fn with_root(root_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root_dir)
            .map_err(|e| Error::Storage(format!("Failed to create root directory: {e}")))?;
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Filesystem-safe directory name for a URL.
    ///
    /// Scheme and query are dropped; anything outside `[A-Za-z0-9._-]`
    /// becomes `_`, and `..` sequences are collapsed so the key can never
    /// escape the root.
    pub fn cache_key(url: &str) -> String {
        let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        let without_query = without_scheme
            .split(['?', '#'])
            .next()
            .unwrap_or(without_scheme);

        let mut key: String = without_query
            .trim_end_matches('/')
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        while key.contains("..") {
            key = key.replace("..", "_");
        }

        if key.len() > MAX_KEY_LEN {
            key.truncate(MAX_KEY_LEN);
        }

        if key.is_empty() || key.chars().all(|c| c == '.') {
            "index".to_string()
        } else {
            key
        }
    }

    fn source_dir(&self, url: &str) -> PathBuf {
        self.root_dir.join(Self::cache_key(url))
    }

    pub fn index_path(&self, url: &str) -> PathBuf {
        self.source_dir(url).join(INDEX_FILE)
    }

    fn metadata_path(&self, url: &str) -> PathBuf {
        self.source_dir(url).join(METADATA_FILE)
    }

    /// Store fetched index text and its metadata.
    pub fn save(&self, metadata: &CachedSource, content: &str) -> Result<()> {
        let dir = self.source_dir(&metadata.url);
        fs::create_dir_all(&dir)
            .map_err(|e| Error::Storage(format!("Failed to create cache directory: {e}")))?;

        // Write to a temp file first so a crash never leaves half an index.
        let index_path = dir.join(INDEX_FILE);
        let tmp_path = dir.join(format!("{INDEX_FILE}.tmp"));
        fs::write(&tmp_path, content)
            .map_err(|e| Error::Storage(format!("Failed to write cached index: {e}")))?;
        fs::rename(&tmp_path, &index_path)
            .map_err(|e| Error::Storage(format!("Failed to replace cached index: {e}")))?;

        let json = serde_json::to_string_pretty(metadata)?;
        fs::write(dir.join(METADATA_FILE), json)
            .map_err(|e| Error::Storage(format!("Failed to write cache metadata: {e}")))?;

        info!("Cached {} bytes for {}", content.len(), metadata.url);
        Ok(())
    }

    /// Metadata for a cached URL, or `None` when nothing usable is cached.
    ///
    /// Unreadable or corrupt metadata counts as not cached, so the caller
    /// refetches instead of failing.
    pub fn load_metadata(&self, url: &str) -> Result<Option<CachedSource>> {
        let path = self.metadata_path(url);
        if !path.exists() || !self.index_path(url).exists() {
            return Ok(None);
        }
        let metadata = match fs::read_to_string(&path)
            .map_err(Error::from)
            .and_then(|json| serde_json::from_str::<CachedSource>(&json).map_err(Error::from))
        {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Ignoring cache metadata at {}: {}", path.display(), e);
                return Ok(None);
            },
        };

        // Keys can collide after sanitizing; only trust a matching URL.
        if metadata.url == url {
            Ok(Some(metadata))
        } else {
            debug!("Cache entry for {} belongs to {}", url, metadata.url);
            Ok(None)
        }
    }

    pub fn load_content(&self, url: &str) -> Result<String> {
        fs::read_to_string(self.index_path(url))
            .map_err(|e| Error::Storage(format!("Failed to read cached index: {e}")))
    }

    /// URLs with a cached copy, sorted.
    pub fn list(&self) -> Result<Vec<CachedSource>> {
        let mut sources = Vec::new();
        let entries = fs::read_dir(&self.root_dir)
            .map_err(|e| Error::Storage(format!("Failed to read cache directory: {e}")))?;

        for entry in entries.flatten() {
            let meta_path = entry.path().join(METADATA_FILE);
            let Ok(json) = fs::read_to_string(&meta_path) else {
                continue;
            };
            if let Ok(metadata) = serde_json::from_str::<CachedSource>(&json) {
                sources.push(metadata);
            }
        }

        sources.sort_by(|a, b| a.url.cmp(&b.url));
        Ok(sources)
    }

    /// Remove every cached index; returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        let entries = fs::read_dir(&self.root_dir)
            .map_err(|e| Error::Storage(format!("Failed to read cache directory: {e}")))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)
                    .map_err(|e| Error::Storage(format!("Failed to remove {}: {e}", path.display())))?;
                removed += 1;
            }
        }

        info!("Cleared {} cached indexes", removed);
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::with_root(temp_dir.path().join("cache")).unwrap();
        (storage, temp_dir)
    }

    fn metadata(url: &str) -> CachedSource {
        CachedSource {
            url: url.to_string(),
            etag: Some("\"abc\"".to_string()),
            last_modified: None,
            fetched_at: Utc::now(),
            sha256: "hash".to_string(),
        }
    }

    #[test]
    fn test_cache_key_is_filesystem_safe() {
        assert_eq!(
            Storage::cache_key("https://juliacollections.github.io/AbstractTrees.jl/dev/search_index.js"),
            "juliacollections.github.io_AbstractTrees.jl_dev_search_index.js"
        );
        assert_eq!(Storage::cache_key("https://x.org/a/?q=1#frag"), "x.org_a");
        assert!(!Storage::cache_key("https://x.org/../../etc").contains(".."));
        assert_eq!(Storage::cache_key("https://"), "index");
    }

    #[test]
    fn test_save_and_load() {
        let (storage, _dir) = create_test_storage();
        let url = "https://example.org/docs/search_index.js";

        assert!(storage.load_metadata(url).unwrap().is_none());

        storage.save(&metadata(url), "{\"docs\":[]}").unwrap();

        let loaded = storage.load_metadata(url).unwrap().unwrap();
        assert_eq!(loaded.url, url);
        assert_eq!(loaded.etag.as_deref(), Some("\"abc\""));
        assert_eq!(storage.load_content(url).unwrap(), "{\"docs\":[]}");
    }

    #[test]
    fn test_save_overwrites_previous_copy() {
        let (storage, _dir) = create_test_storage();
        let url = "https://example.org/search_index.js";
        storage.save(&metadata(url), "old").unwrap();
        storage.save(&metadata(url), "new").unwrap();
        assert_eq!(storage.load_content(url).unwrap(), "new");
    }

    #[test]
    fn test_colliding_key_with_other_url_is_ignored() {
        let (storage, _dir) = create_test_storage();
        storage.save(&metadata("https://example.org/a_b"), "x").unwrap();
        assert!(storage.load_metadata("https://example.org/a/b").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_metadata_counts_as_uncached() {
        let (storage, _dir) = create_test_storage();
        let url = "https://example.org/docs/search_index.js";
        storage.save(&metadata(url), "{\"docs\":[]}").unwrap();

        let meta_path = storage.index_path(url).with_file_name(METADATA_FILE);
        fs::write(&meta_path, "{ not json").unwrap();

        assert!(storage.load_metadata(url).unwrap().is_none());
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_and_clear() {
        let (storage, _dir) = create_test_storage();
        storage.save(&metadata("https://b.org/i.js"), "x").unwrap();
        storage.save(&metadata("https://a.org/i.js"), "y").unwrap();

        let urls: Vec<String> = storage.list().unwrap().into_iter().map(|s| s.url).collect();
        assert_eq!(urls, vec!["https://a.org/i.js", "https://b.org/i.js"]);

        assert_eq!(storage.clear().unwrap(), 2);
        assert!(storage.list().unwrap().is_empty());
    }
}
