//! Turning global flags into a loaded index.

use anyhow::{Context, Result, anyhow};
use docsearch_core::{Config, DocIndex, IndexSource, Loader, Storage};
use url::Url;

use crate::cli::Cli;

/// Global settings shared by every data command.
pub struct Session {
    pub config: Config,
    pub source: IndexSource,
    offline: bool,
}

impl Session {
    /// Load config and work out the index source.
    ///
    /// `--source` wins over `source.default` from the config file.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load_from(cli.config.as_deref()).context("Failed to load config")?;

        let raw = cli
            .source
            .clone()
            .or_else(|| config.source.default.clone())
            .ok_or_else(|| {
                anyhow!("No index source. Pass --source <PATH|URL> or set source.default in the config")
            })?;
        let source = IndexSource::parse(&raw)?;

        Ok(Self {
            config,
            source,
            offline: cli.offline,
        })
    }

    pub async fn load(&self) -> Result<DocIndex> {
        let mut loader = Loader::new(self.config.clone()).offline(self.offline);
        if matches!(self.source, IndexSource::Url(_)) {
            loader = loader.with_storage(Storage::new()?);
        }
        loader
            .load(&self.source)
            .await
            .with_context(|| format!("Failed to load index from {}", self.source))
    }

    /// Site root that entry locations are relative to.
    ///
    /// `source.base_url` when configured, otherwise the directory a URL
    /// source was served from.
    pub fn base_url(&self) -> Result<Option<Url>> {
        if let Some(base) = self.config.base_url()? {
            return Ok(Some(base));
        }
        match &self.source {
            IndexSource::Url(url) => Ok(Some(url.join("./")?)),
            IndexSource::Path(_) => Ok(None),
        }
    }
}
