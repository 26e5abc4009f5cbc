//! Lossless tokenization of summary text.
//!
//! Text is split into maximal word runs, maximal whitespace runs, and
//! single-character punctuation tokens. Characters that fit none of those
//! classes become single-character [`TokenKind::Other`] tokens, so joining
//! the tokens always gives back the input.

/// Sentence punctuation recognised as its own token class.
pub const PUNCTUATION: [char; 7] = ['.', ',', '!', '?', ';', ':', '"'];

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Maximal run of alphanumeric characters and underscores.
    Word,
    /// Maximal run of whitespace.
    Whitespace,
    /// One character from [`PUNCTUATION`].
    Punctuation,
    /// One character of any other kind (quotes, dashes, brackets, ...).
    Other,
}

/// A slice of the input text with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl Token<'_> {
    /// Whether this token is eligible for dictionary lookup.
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// Combining diacritical mark blocks. Marks that Unicode already counts as
/// alphabetic (most Arabic harakat, for instance) pass `is_alphanumeric`.
const COMBINING_MARKS: [(char, char); 5] = [
    ('\u{0300}', '\u{036F}'),
    ('\u{1AB0}', '\u{1AFF}'),
    ('\u{1DC0}', '\u{1DFF}'),
    ('\u{20D0}', '\u{20FF}'),
    ('\u{FE20}', '\u{FE2F}'),
];

/// Whether `c` is a combining mark that attaches to the preceding letter.
pub(crate) fn is_combining_mark(c: char) -> bool {
    COMBINING_MARKS.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Characters that extend a word run once it has started.
fn continues_word(c: char) -> bool {
    is_word_char(c) || is_combining_mark(c)
}

fn classify(c: char) -> TokenKind {
    if is_word_char(c) {
        TokenKind::Word
    } else if c.is_whitespace() {
        TokenKind::Whitespace
    } else if PUNCTUATION.contains(&c) {
        TokenKind::Punctuation
    } else {
        TokenKind::Other
    }
}

/// Lazy iterator over the tokens of a string.
///
/// Created by [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.rest.char_indices();
        let (_, first) = chars.next()?;
        let kind = classify(first);

        let end = match kind {
            TokenKind::Word => chars
                .find(|&(_, c)| !continues_word(c))
                .map_or(self.rest.len(), |(idx, _)| idx),
            TokenKind::Whitespace => chars
                .find(|&(_, c)| classify(c) != kind)
                .map_or(self.rest.len(), |(idx, _)| idx),
            TokenKind::Punctuation | TokenKind::Other => first.len_utf8(),
        };

        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Token { kind, text })
    }
}

/// Splits `text` into tokens without discarding any character.
///
/// # Example
///
/// ```rust
/// use khulasa_core::translate::{TokenKind, tokenize};
///
/// let kinds: Vec<TokenKind> = tokenize("Hi, you").map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Word, TokenKind::Punctuation, TokenKind::Whitespace, TokenKind::Word]
/// );
/// ```
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}
