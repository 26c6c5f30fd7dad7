use serde::Serialize;

/// A whitespace-delimited word with its UTF-8 byte offsets in the source.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Token<'a> {
    /// The word content.
    pub text: &'a str,
    /// Byte offset (inclusive) in the source text.
    pub start: usize,
    /// Byte offset (exclusive) in the source text.
    pub end: usize,
}

impl AsRef<str> for Token<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

/// Splits text on Unicode whitespace and records byte offsets.
///
/// This is word splitting, not model tokenization; use
/// [`estimate_tokens`](crate::budget::estimate_tokens) for token counts.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::with_capacity(text.len() / 5 + 1);
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(token_start) = start.take() {
                tokens.push(Token {
                    text: &text[token_start..idx],
                    start: token_start,
                    end: idx,
                });
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(token_start) = start {
        tokens.push(Token {
            text: &text[token_start..],
            start: token_start,
            end: text.len(),
        });
    }

    tokens
}

/// Number of whitespace-delimited words in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
