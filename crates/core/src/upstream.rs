//! Client for the RapidAPI article extractor and summarizer.
//!
//! The service fetches the article itself, so only the article URL is sent.
//! It can answer directly in Urdu (`lang=ur`), which is the default mode;
//! in local mode the summary is requested in English and translated with
//! the dictionary afterwards.

use std::fmt;
use std::str::FromStr;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::fetch::{FetchConfig, map_send_error};
use crate::{KhulasaError, Result};

pub const DEFAULT_API_HOST: &str = "article-extractor-and-summarizer.p.rapidapi.com";
pub const DEFAULT_API_BASE: &str = "https://article-extractor-and-summarizer.p.rapidapi.com";
pub const DEFAULT_ENGINE: &str = "2";

/// Text used when the service answers without a summary.
pub const SUMMARY_UNAVAILABLE: &str = "Summary not available.";

/// Where the Urdu text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationMode {
    /// The service translates (`lang=ur`).
    #[default]
    Upstream,
    /// English summary, translated with the local dictionary.
    Local,
}

impl TranslationMode {
    /// Language code sent to the service.
    pub fn lang(self) -> &'static str {
        match self {
            Self::Upstream => "ur",
            Self::Local => "en",
        }
    }
}

impl FromStr for TranslationMode {
    type Err = KhulasaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "upstream" | "api" | "remote" => Ok(Self::Upstream),
            "local" | "dictionary" => Ok(Self::Local),
            _ => Err(KhulasaError::ConfigError(format!(
                "Invalid translation mode: {}. Valid options: upstream, local",
                s
            ))),
        }
    }
}

impl fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Upstream => "upstream",
            Self::Local => "local",
        })
    }
}

/// Connection settings for the summarization service.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// RapidAPI key; requests fail fast when absent.
    pub api_key: Option<String>,
    /// Value of the `X-RapidAPI-Host` header.
    pub api_host: String,
    /// Base URL the `/summarize` path is appended to.
    pub base_url: String,
    /// Summarization engine selector.
    pub engine: String,
    /// Ask the service for HTML-formatted summaries.
    pub include_html: bool,
    /// Timeout and User-Agent for the call.
    pub fetch: FetchConfig,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            engine: DEFAULT_ENGINE.to_string(),
            include_html: false,
            fetch: FetchConfig::default(),
        }
    }
}

impl UpstreamConfig {
    /// Returns the API key or [`KhulasaError::MissingApiKey`].
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(KhulasaError::MissingApiKey)
    }

    /// Full endpoint URL including query parameters.
    pub fn summarize_url(&self, article: &Url, mode: TranslationMode) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/summarize", base))
            .map_err(|e| KhulasaError::ConfigError(format!("invalid API base URL '{}': {}", self.base_url, e)))?;

        url.query_pairs_mut()
            .append_pair("url", article.as_str())
            .append_pair("html", if self.include_html { "true" } else { "false" })
            .append_pair("lang", mode.lang())
            .append_pair("engine", &self.engine);

        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pulls a human-readable message out of a failed response body.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown RapidAPI error.").to_string())
}

/// Requests a summary of `article` from the service.
pub async fn request_summary(
    client: &Client,
    config: &UpstreamConfig,
    article: &Url,
    mode: TranslationMode,
) -> Result<String> {
    let api_key = config.require_api_key()?;
    let endpoint = config.summarize_url(article, mode)?;

    let key_prefix: String = api_key.chars().take(5).collect();
    tracing::debug!(
        %key_prefix,
        %article,
        lang = mode.lang(),
        "requesting summary"
    );

    let response = client
        .get(endpoint)
        .timeout(config.fetch.timeout_duration())
        .header("X-RapidAPI-Key", api_key)
        .header("X-RapidAPI-Host", &config.api_host)
        .send()
        .await
        .map_err(|e| map_send_error(e, config.fetch.timeout))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| map_send_error(e, config.fetch.timeout))?;

    if !status.is_success() {
        let message = error_message(&body, status);
        tracing::warn!(status = status.as_u16(), %message, "summarization service error");
        return Err(KhulasaError::Upstream { status: status.as_u16(), message });
    }

    let parsed: SummaryBody = serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(error = %e, "unreadable summarization response");
        KhulasaError::InvalidResponse(e.to_string())
    })?;

    Ok(parsed
        .summary
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| SUMMARY_UNAVAILABLE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_mode_parse() {
        assert_eq!("upstream".parse::<TranslationMode>().unwrap(), TranslationMode::Upstream);
        assert_eq!(" LOCAL ".parse::<TranslationMode>().unwrap(), TranslationMode::Local);
        assert!(matches!(
            "klingon".parse::<TranslationMode>(),
            Err(KhulasaError::ConfigError(_))
        ));
    }

    #[test]
    fn test_translation_mode_lang() {
        assert_eq!(TranslationMode::Upstream.lang(), "ur");
        assert_eq!(TranslationMode::Local.lang(), "en");
        assert_eq!(TranslationMode::default(), TranslationMode::Upstream);
    }

    #[test]
    fn test_translation_mode_serde() {
        let json = serde_json::to_string(&TranslationMode::Local).unwrap();
        assert_eq!(json, "\"local\"");
        let mode: TranslationMode = serde_json::from_str("\"upstream\"").unwrap();
        assert_eq!(mode, TranslationMode::Upstream);
    }

    #[test]
    fn test_require_api_key() {
        let mut config = UpstreamConfig::default();
        assert!(matches!(config.require_api_key(), Err(KhulasaError::MissingApiKey)));

        config.api_key = Some("   ".to_string());
        assert!(matches!(config.require_api_key(), Err(KhulasaError::MissingApiKey)));

        config.api_key = Some("abc123".to_string());
        assert_eq!(config.require_api_key().unwrap(), "abc123");
    }

    #[test]
    fn test_summarize_url_query() {
        let config = UpstreamConfig::default();
        let article = Url::parse("https://example.com/post?id=7&x=y").unwrap();
        let url = config.summarize_url(&article, TranslationMode::Upstream).unwrap();

        assert_eq!(url.host_str(), Some(DEFAULT_API_HOST));
        assert_eq!(url.path(), "/summarize");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("url".to_string(), "https://example.com/post?id=7&x=y".to_string())));
        assert!(pairs.contains(&("lang".to_string(), "ur".to_string())));
        assert!(pairs.contains(&("engine".to_string(), "2".to_string())));
        assert!(pairs.contains(&("html".to_string(), "false".to_string())));
    }

    #[test]
    fn test_summarize_url_trailing_slash() {
        let config = UpstreamConfig { base_url: "http://127.0.0.1:9/".to_string(), ..Default::default() };
        let article = Url::parse("https://example.com").unwrap();
        let url = config.summarize_url(&article, TranslationMode::Local).unwrap();
        assert_eq!(url.path(), "/summarize");
    }

    #[test]
    fn test_error_message_extraction() {
        let status = reqwest::StatusCode::FORBIDDEN;
        assert_eq!(error_message(r#"{"message":"You are not subscribed"}"#, status), "You are not subscribed");
        assert_eq!(error_message(r#"{"error":"Bad article"}"#, status), "Bad article");
        assert_eq!(error_message("<html>nope</html>", status), "Forbidden");
    }
}
