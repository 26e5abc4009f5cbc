//! The summary request pipeline.
//!
//! [`Summarizer`] validates the article URL, optionally scrapes the page,
//! asks the upstream service for a summary and applies the dictionary
//! fallback when the service was asked for English. Both network calls are
//! sequential; the first failure ends the request.
//!
//! # Example
//!
//! ```rust,no_run
//! use khulasa_core::{SummarizerConfig, Summarizer, SummaryRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> khulasa_core::Result<()> {
//! let config = SummarizerConfig::builder().api_key("my-rapidapi-key").scrape(true).build();
//! let summarizer = Summarizer::new(config)?;
//! let result = summarizer.summarize(&SummaryRequest::new("https://example.com/post")).await?;
//! println!("{}", result.translated_summary);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::fetch::{FetchConfig, build_client, fetch_url, validate_url};
use crate::scrape::{ScrapeConfig, page_title, scrape_text};
use crate::translate::{Dictionary, translate};
use crate::upstream::{TranslationMode, UpstreamConfig, request_summary};
use crate::Result;

/// Incoming summary request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// Article URL. A missing field is treated like an empty URL.
    #[serde(default)]
    pub url: String,
    /// Also fetch the page and return its visible text.
    #[serde(default)]
    pub scrape: Option<bool>,
    /// Overrides the configured translation mode.
    #[serde(default)]
    pub translation: Option<TranslationMode>,
}

impl SummaryRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), scrape: None, translation: None }
    }
}

/// Result returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// Summary as returned by the service.
    pub summary: String,
    /// Urdu text shown to the user.
    pub translated_summary: String,
    /// How `translated_summary` was produced.
    pub translation: TranslationMode,
    /// Page title, when the page was scraped.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    /// Visible page text, when the page was scraped.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scraped_text: Option<String>,
}

/// Configuration for the summarization pipeline.
#[derive(Debug, Clone, Default)]
pub struct SummarizerConfig {
    /// Upstream service settings.
    pub upstream: UpstreamConfig,
    /// Default translation mode when a request does not choose one.
    pub translation: TranslationMode,
    /// Default for scraping when a request does not choose.
    pub scrape: bool,
    /// Page fetch settings for scraping.
    pub fetch: FetchConfig,
    /// Limits for scraped text.
    pub scrape_config: ScrapeConfig,
}

impl SummarizerConfig {
    pub fn builder() -> SummarizerConfigBuilder {
        SummarizerConfigBuilder::new()
    }
}

/// Builder for [`SummarizerConfig`].
#[derive(Debug)]
pub struct SummarizerConfigBuilder {
    config: SummarizerConfig,
}

impl SummarizerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: SummarizerConfig::default() }
    }

    /// Sets the RapidAPI key.
    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.config.upstream.api_key = Some(value.into());
        self
    }

    /// Sets an optional RapidAPI key.
    pub fn maybe_api_key(mut self, value: Option<String>) -> Self {
        self.config.upstream.api_key = value;
        self
    }

    /// Sets the `X-RapidAPI-Host` header value.
    pub fn api_host(mut self, value: impl Into<String>) -> Self {
        self.config.upstream.api_host = value.into();
        self
    }

    /// Sets the base URL of the summarization service.
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.config.upstream.base_url = value.into();
        self
    }

    /// Asks the service for HTML summaries.
    pub fn include_html(mut self, value: bool) -> Self {
        self.config.upstream.include_html = value;
        self
    }

    /// Sets the default translation mode.
    pub fn translation(mut self, value: TranslationMode) -> Self {
        self.config.translation = value;
        self
    }

    /// Sets whether pages are scraped by default.
    pub fn scrape(mut self, value: bool) -> Self {
        self.config.scrape = value;
        self
    }

    /// Sets the per-call timeout for both outbound calls.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self.config.upstream.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent for page fetches.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the largest page body accepted when scraping.
    pub fn max_page_bytes(mut self, value: usize) -> Self {
        self.config.fetch.max_bytes = value;
        self
    }

    /// Sets the maximum length of scraped text.
    pub fn max_scraped_chars(mut self, value: usize) -> Self {
        self.config.scrape_config.max_chars = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> SummarizerConfig {
        self.config
    }
}

impl Default for SummarizerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs summary requests. Cheap to clone; clones share the HTTP client and
/// dictionary.
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: Client,
    config: Arc<SummarizerConfig>,
    dictionary: Arc<Dictionary>,
}

impl Summarizer {
    /// Creates a summarizer using the built-in dictionary.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        Self::with_dictionary(config, Dictionary::builtin().clone())
    }

    /// Creates a summarizer with a custom dictionary.
    pub fn with_dictionary(config: SummarizerConfig, dictionary: Dictionary) -> Result<Self> {
        let client = build_client(&config.fetch)?;
        Ok(Self { client, config: Arc::new(config), dictionary: Arc::new(dictionary) })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Handles one summary request end to end.
    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        let article = validate_url(&request.url)?;
        self.config.upstream.require_api_key()?;

        let mode = request.translation.unwrap_or(self.config.translation);
        let scrape = request.scrape.unwrap_or(self.config.scrape);

        tracing::info!(url = %article, %mode, scrape, "summary requested");

        let (title, scraped_text) = if scrape {
            let html = fetch_url(&self.client, &article, &self.config.fetch).await?;
            (page_title(&html), Some(scrape_text(&html, &self.config.scrape_config)))
        } else {
            (None, None)
        };

        let summary = request_summary(&self.client, &self.config.upstream, &article, mode).await?;

        let translated_summary = match mode {
            TranslationMode::Upstream => summary.clone(),
            TranslationMode::Local => translate(&summary, &self.dictionary),
        };

        tracing::debug!(chars = summary.chars().count(), "summary ready");

        Ok(SummaryResult { summary, translated_summary, translation: mode, title, scraped_text })
    }
}
