//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `127.0.0.1` |
//! | `PORT` | `3000` |
//! | `RAPIDAPI_KEY` | unset (requests fail with a configuration error) |
//! | `RAPIDAPI_HOST` | `article-extractor-and-summarizer.p.rapidapi.com` |
//! | `KHULASA_API_BASE` | `https://` + `RAPIDAPI_HOST` |
//! | `KHULASA_TRANSLATION` | `upstream` |
//! | `KHULASA_SCRAPE` | `false` |
//! | `KHULASA_TIMEOUT_SECS` | `30` |
//! | `KHULASA_HTML` | `false` |
//! | `KHULASA_USER_AGENT` | built-in Khulasa agent string |
//! | `KHULASA_MAX_PAGE_BYTES` | `5242880` |
//! | `KHULASA_DICTIONARY` | unset (built-in dictionary only) |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use khulasa_core::upstream::DEFAULT_API_HOST;
use khulasa_core::{KhulasaError, Result, SummarizerConfig, TranslationMode};
use url::Url;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub summarizer: SummarizerConfig,
    /// Extension dictionary merged over the built-in table.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            summarizer: SummarizerConfig::default(),
            dictionary_path: None,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(KhulasaError::ConfigError(format!("{} must be a boolean, got '{}'", key, value))),
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = match lookup("HOST") {
            Some(v) => v
                .parse()
                .map_err(|e| KhulasaError::ConfigError(format!("HOST must be a valid IP address: {}", e)))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port: u16 = match lookup("PORT") {
            Some(v) => v
                .parse()
                .map_err(|e| KhulasaError::ConfigError(format!("PORT must be a valid number: {}", e)))?,
            None => 3000,
        };

        let api_host = lookup("RAPIDAPI_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let base_url = lookup("KHULASA_API_BASE").unwrap_or_else(|| format!("https://{}", api_host));
        Url::parse(&base_url)
            .map_err(|e| KhulasaError::ConfigError(format!("KHULASA_API_BASE is not a valid URL: {}", e)))?;

        let translation = match lookup("KHULASA_TRANSLATION") {
            Some(v) => v.parse::<TranslationMode>()?,
            None => TranslationMode::default(),
        };

        let scrape = match lookup("KHULASA_SCRAPE") {
            Some(v) => parse_bool("KHULASA_SCRAPE", &v)?,
            None => false,
        };

        let mut builder = SummarizerConfig::builder()
            .maybe_api_key(lookup("RAPIDAPI_KEY").filter(|k| !k.trim().is_empty()))
            .api_host(api_host)
            .base_url(base_url)
            .translation(translation)
            .scrape(scrape);

        if let Some(v) = lookup("KHULASA_TIMEOUT_SECS") {
            let secs: u64 = v
                .parse()
                .map_err(|e| KhulasaError::ConfigError(format!("KHULASA_TIMEOUT_SECS must be a number: {}", e)))?;
            if secs == 0 {
                return Err(KhulasaError::ConfigError("KHULASA_TIMEOUT_SECS must be positive".to_string()));
            }
            builder = builder.timeout(secs);
        }

        if let Some(v) = lookup("KHULASA_HTML") {
            builder = builder.include_html(parse_bool("KHULASA_HTML", &v)?);
        }

        if let Some(agent) = lookup("KHULASA_USER_AGENT").filter(|a| !a.trim().is_empty()) {
            builder = builder.user_agent(agent);
        }

        if let Some(v) = lookup("KHULASA_MAX_PAGE_BYTES") {
            let bytes: usize = v
                .parse()
                .map_err(|e| KhulasaError::ConfigError(format!("KHULASA_MAX_PAGE_BYTES must be a number: {}", e)))?;
            if bytes == 0 {
                return Err(KhulasaError::ConfigError("KHULASA_MAX_PAGE_BYTES must be positive".to_string()));
            }
            builder = builder.max_page_bytes(bytes);
        }

        Ok(Self {
            host,
            port,
            summarizer: builder.build(),
            dictionary_path: lookup("KHULASA_DICTIONARY").map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
