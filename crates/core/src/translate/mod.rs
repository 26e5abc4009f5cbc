//! Dictionary-substitution translation.
//!
//! The fallback used when the upstream service does not translate: every
//! word that matches a dictionary key (ignoring case) is swapped for its
//! Urdu value, everything else passes through untouched.
//!
//! # Example
//!
//! ```rust
//! use khulasa_core::translate::{Dictionary, translate};
//!
//! let dict = Dictionary::from_pairs([("the", "دی"), ("is", "ہے")]);
//! assert_eq!(translate("The cat is happy.", &dict), "دی cat ہے happy.");
//! ```

pub mod dictionary;
pub mod tokenize;

use std::borrow::Cow;

pub use dictionary::Dictionary;
pub use tokenize::{PUNCTUATION, Token, TokenKind, Tokens, tokenize};

use tokenize::is_combining_mark;

/// Edge characters stripped before lookup (underscores and the like).
fn is_edge(c: char) -> bool {
    !c.is_alphanumeric() && !is_combining_mark(c)
}

/// Translates a single token, borrowing it when nothing matches.
pub fn translate_token<'a>(token: Token<'a>, dict: &Dictionary) -> Cow<'a, str> {
    if !token.is_word() {
        return Cow::Borrowed(token.text);
    }

    let core = token.text.trim_matches(is_edge);
    if core.is_empty() {
        return Cow::Borrowed(token.text);
    }

    match dict.lookup(&core.to_lowercase()) {
        Some(value) => {
            let start = token.text.len() - token.text.trim_start_matches(is_edge).len();
            let end = start + core.len();
            let mut out = String::with_capacity(token.text.len() - core.len() + value.len());
            out.push_str(&token.text[..start]);
            out.push_str(value);
            out.push_str(&token.text[end..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(token.text),
    }
}

/// Yields one output piece per input token.
pub fn translate_tokens<'a>(text: &'a str, dict: &'a Dictionary) -> impl Iterator<Item = Cow<'a, str>> + 'a {
    tokenize(text).map(move |token| translate_token(token, dict))
}

/// Produces a word-for-word approximation of `text` using `dict`.
///
/// Never fails: unknown words, punctuation and whitespace are copied as-is.
pub fn translate(text: &str, dict: &Dictionary) -> String {
    translate_tokens(text, dict).collect()
}
