//! Configuration management for docsearch.
//!
//! Settings live in a single TOML file. The file is optional: a missing file
//! yields [`Config::default`], a malformed one is an error.
//!
//! ## File Location
//!
//! - explicit path passed to [`Config::load_from`] (the CLI's `--config`)
//! - otherwise the platform config directory, e.g.
//!   `~/.config/docsearch/config.toml` on Linux
//!
//! ## Example Configuration File
//!
//! ```toml
//! [search]
//! limit = 10
//! snippet_chars = 160
//! title_boost = 2.0
//!
//! [source]
//! default = "docs/build"
//! base_url = "https://juliacollections.github.io/AbstractTrees.jl/dev/"
//!
//! [fetch]
//! timeout_secs = 30
//! ```
//!
//! ## Environment Overrides
//!
//! `DOCSEARCH_SOURCE` and `DOCSEARCH_BASE_URL` replace the `[source]` values
//! after the file is read.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Full-text search tuning
    pub search: SearchConfig,
    /// Where the index comes from
    pub source: SourceConfig,
    /// HTTP settings for remote indexes
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum hits returned when the caller gives no limit.
    pub limit: usize,
    /// Approximate snippet width in characters.
    pub snippet_chars: usize,
    /// Score multiplier for matches in entry titles.
    pub title_boost: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: 10,
            snippet_chars: 160,
            title_boost: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Index path or URL used when none is given on the command line.
    pub default: Option<String>,
    /// Root URL of the published documentation, for turning locations into links.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("docsearch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to the default location.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::read(path)?
            },
            None => match Self::config_path() {
                Ok(default_path) if default_path.exists() => Self::read(&default_path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.check()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// Platform config file path, e.g. `~/.config/docsearch/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "docsearch", "docsearch")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Some(source) = non_empty_env("DOCSEARCH_SOURCE") {
            self.source.default = Some(source);
        }
        if let Some(base_url) = non_empty_env("DOCSEARCH_BASE_URL") {
            self.source.base_url = Some(base_url);
        }
    }

    fn check(&self) -> Result<()> {
        if self.search.limit == 0 {
            return Err(Error::Config("search.limit must be at least 1".into()));
        }
        if !self.search.title_boost.is_finite() || self.search.title_boost <= 0.0 {
            return Err(Error::Config("search.title_boost must be a positive number".into()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(Error::Config("fetch.timeout_secs must be at least 1".into()));
        }
        if let Some(base) = &self.source.base_url {
            Url::parse(base)
                .map_err(|e| Error::Config(format!("source.base_url '{base}' is invalid: {e}")))?;
        }
        Ok(())
    }

    /// Parsed `source.base_url`, if configured.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.source
            .base_url
            .as_deref()
            .map(|base| Url::parse(base).map_err(Error::from))
            .transpose()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.limit, 10);
        assert_eq!(config.search.snippet_chars, 160);
        assert!(config.source.default.is_none());
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(config.fetch.user_agent.starts_with("docsearch/"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[search]\nlimit = 25\n").unwrap();
        assert_eq!(config.search.limit, 25);
        assert_eq!(config.search.snippet_chars, 160);
        assert_eq!(config.fetch, FetchConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.limit = 3;
        config.source.base_url = Some("https://example.org/docs/".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::read(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = Config::load_from(Some(&temp_dir.path().join("nope.toml"))).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[search\nlimit = ").unwrap();
        assert!(Config::read(&path).is_err());
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let mut config = Config::default();
        config.search.limit = 0;
        assert!(config.check().is_err());

        let mut config = Config::default();
        config.search.title_boost = -1.0;
        assert!(config.check().is_err());

        let mut config = Config::default();
        config.source.base_url = Some("not a url".to_string());
        assert!(config.check().is_err());
    }

    #[test]
    fn test_base_url_parses() {
        let mut config = Config::default();
        assert!(config.base_url().unwrap().is_none());
        config.source.base_url = Some("https://example.org/docs/".to_string());
        assert_eq!(
            config.base_url().unwrap().unwrap().as_str(),
            "https://example.org/docs/"
        );
    }
}
