//! Content fetching from URLs, files, and stdin.
//!
//! Page fetching is one of the two outbound calls a summary request can
//! make. It uses a fixed timeout and never retries.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
use url::Url;

use crate::{KhulasaError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Largest page body accepted, in bytes.
    pub max_bytes: usize,
}

/// Default page size limit (5 MiB).
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Khulasa/0.1; article summarizer)".to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl FetchConfig {
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// # Example
///
/// ```rust
/// use khulasa_core::fetch::validate_url;
///
/// assert!(validate_url("https://example.com/post").is_ok());
/// assert!(validate_url("example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(KhulasaError::InvalidUrl("URL is empty".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| KhulasaError::InvalidUrl(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(KhulasaError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(KhulasaError::InvalidUrl("URL has no host".to_string()));
    }

    Ok(url)
}

/// Builds the shared HTTP client used for page fetches.
#[cfg(feature = "fetch")]
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout_duration())
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(KhulasaError::HttpError)
}

/// Maps a reqwest send error, turning timeouts into [`KhulasaError::Timeout`].
#[cfg(feature = "fetch")]
pub(crate) fn map_send_error(err: reqwest::Error, timeout: u64) -> KhulasaError {
    if err.is_timeout() { KhulasaError::Timeout { timeout } } else { KhulasaError::HttpError(err) }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and sends browser-like headers. A non-success status is
/// reported as [`KhulasaError::PageFetch`]. The body is read in chunks and
/// abandoned with [`KhulasaError::PageTooLarge`] once it passes
/// [`FetchConfig::max_bytes`]; invalid UTF-8 is replaced.
#[cfg(feature = "fetch")]
pub async fn fetch_url(client: &Client, url: &Url, config: &FetchConfig) -> Result<String> {
    tracing::debug!(%url, "fetching page");

    let mut response = client
        .get(url.clone())
        .timeout(config.timeout_duration())
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| map_send_error(e, config.timeout))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, status = status.as_u16(), "page fetch failed");
        return Err(KhulasaError::PageFetch {
            status: status.as_u16(),
            message: format!("page returned {}", status),
        });
    }

    let limit = config.max_bytes;
    if response.content_length().is_some_and(|len| len > limit as u64) {
        tracing::warn!(%url, limit, "page declares a body over the limit");
        return Err(KhulasaError::PageTooLarge { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| map_send_error(e, config.timeout))? {
        if body.len() + chunk.len() > limit {
            tracing::warn!(%url, limit, "page body over the limit");
            return Err(KhulasaError::PageTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(KhulasaError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(KhulasaError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(KhulasaError::from)?;

    Ok(buffer)
}
