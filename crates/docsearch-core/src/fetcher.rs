use crate::parser::content_sha256;
use crate::{Error, FetchConfig, Result};
use reqwest::header::{
    ETAG, HeaderMap, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// HTTP client for published search indexes, with conditional request support
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with the default timeout and user agent
    pub fn new() -> Result<Self> {
        Self::from_config(&FetchConfig::default())
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Fetches a URL, sending `If-None-Match` / `If-Modified-Since` when known
    pub async fn fetch_with_cache(
        &self,
        url: &str,
        etag: Option<&str>,
        last_modified: Option<&str>,
    ) -> Result<FetchResult> {
        let mut request = self.client.get(url);

        if let Some(tag) = etag {
            debug!("Setting If-None-Match: {}", tag);
            request = request.header(IF_NONE_MATCH, tag);
        }

        if let Some(lm) = last_modified {
            debug!("Setting If-Modified-Since: {}", lm);
            request = request.header(IF_MODIFIED_SINCE, lm);
        }

        let response = request.send().await?;
        let status = response.status();

        let new_etag = header_string(response.headers(), &ETAG);
        let new_last_modified = header_string(response.headers(), &LAST_MODIFIED);

        if status == StatusCode::NOT_MODIFIED {
            info!("Index not modified (304) at {}", url);
            return Ok(FetchResult::NotModified {
                etag: new_etag,
                last_modified: new_last_modified,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!(
                "No search index at '{url}'. Check the documentation URL"
            )));
        }

        let response = response.error_for_status()?;
        let content = response.text().await?;
        let sha256 = content_sha256(&content);

        info!("Fetched {} bytes from {}", content.len(), url);

        Ok(FetchResult::Modified {
            content,
            etag: new_etag,
            last_modified: new_last_modified,
            sha256,
        })
    }

    /// Unconditional fetch
    pub async fn fetch(&self, url: &str) -> Result<String> {
        match self.fetch_with_cache(url, None, None).await? {
            FetchResult::Modified { content, .. } => Ok(content),
            FetchResult::NotModified { .. } => Err(Error::Other(format!(
                "Server answered 304 to an unconditional request for '{url}'"
            ))),
        }
    }
}

fn header_string(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(std::string::ToString::to_string)
}

/// Result of a conditional HTTP fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Resource has not been modified since last fetch
    NotModified {
        /// `ETag` header value if present
        etag: Option<String>,
        /// `Last-Modified` header value if present
        last_modified: Option<String>,
    },
    /// Resource has been modified and new content was fetched
    Modified {
        /// The fetched content
        content: String,
        /// `ETag` header value if present
        etag: Option<String>,
        /// `Last-Modified` header value if present
        last_modified: Option<String>,
        /// `SHA256` hash of the content
        sha256: String,
    },
}
