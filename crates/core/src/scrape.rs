//! Visible-text extraction from article pages.
//!
//! Non-visible elements are removed with a streaming rewrite before the page
//! is parsed, then the text of block-level elements is collected in document
//! order.
//!
//! # Example
//!
//! ```rust
//! use khulasa_core::scrape::visible_text;
//!
//! let html = "<html><body><script>var x;</script><p>Hello   there</p></body></html>";
//! assert_eq!(visible_text(html), "Hello there");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{KhulasaError, Result};

/// Elements whose content is never shown to a reader.
const INVISIBLE_TAGS: [&str; 7] = ["script", "style", "noscript", "template", "iframe", "svg", "canvas"];

/// Elements that hold readable blocks of text.
const BLOCK_TAGS: [&str; 9] = ["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "blockquote"];

/// Configuration for scraped text placed in responses.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Maximum number of characters kept (0 = unlimited).
    pub max_chars: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self { max_chars: 5000 }
    }
}

/// Remove invisible elements (and their content) from HTML.
///
/// Falls back to the input unchanged if the rewriter rejects it.
pub fn strip_invisible(html: &str) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: INVISIBLE_TAGS
                .iter()
                .map(|tag| {
                    lol_html::element!(tag, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() {
        tracing::debug!("html rewrite failed, keeping original markup");
        return html.to_string();
    }

    if rewriter.end().is_err() {
        return html.to_string();
    }

    output
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_block(el: &ElementRef<'_>) -> bool {
    BLOCK_TAGS.contains(&el.value().name())
}

fn block_selector() -> Result<Selector> {
    Selector::parse(&BLOCK_TAGS.join(", ")).map_err(|e| KhulasaError::HtmlParseError(e.to_string()))
}

/// Extracts the readable text of a page.
///
/// Blocks are joined with blank lines. Pages without block elements fall
/// back to the whole `<body>` text.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(&strip_invisible(html));

    let blocks: Vec<String> = match block_selector() {
        Ok(selector) => document
            .select(&selector)
            .filter(|el| !el.ancestors().filter_map(ElementRef::wrap).any(|a| is_block(&a)))
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect(),
        Err(_) => Vec::new(),
    };

    if !blocks.is_empty() {
        return blocks.join("\n\n");
    }

    let body = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next().map(|b| b.text().collect::<String>()))
        .unwrap_or_default();

    collapse_whitespace(&body)
}

/// Gets the trimmed `<title>` text, if any.
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// Shortens `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    if max_chars == 0 {
        return text;
    }
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end(),
        None => text,
    }
}

/// Visible text limited according to `config`.
pub fn scrape_text(html: &str, config: &ScrapeConfig) -> String {
    let text = visible_text(html);
    truncate_chars(&text, config.max_chars).to_string()
}
