//! Article summaries in Urdu.
//!
//! The library behind the `khulasa` server and CLI: URL validation, page
//! scraping, the RapidAPI summarization client, and the dictionary
//! fallback translator.

pub mod error;
pub mod fetch;
#[cfg(feature = "fetch")]
pub mod pipeline;
pub mod scrape;
pub mod translate;
#[cfg(feature = "fetch")]
pub mod upstream;

pub use error::{ErrorKind, KhulasaError, Result};
pub use fetch::{FetchConfig, fetch_file, fetch_stdin, validate_url};
#[cfg(feature = "fetch")]
pub use fetch::{build_client, fetch_url};
#[cfg(feature = "fetch")]
pub use pipeline::{Summarizer, SummarizerConfig, SummarizerConfigBuilder, SummaryRequest, SummaryResult};
pub use scrape::{ScrapeConfig, page_title, scrape_text, visible_text};
pub use translate::{Dictionary, Token, TokenKind, tokenize, translate};
#[cfg(feature = "fetch")]
pub use upstream::{SUMMARY_UNAVAILABLE, TranslationMode, UpstreamConfig};
