use std::ops::Range;

use serde::Serialize;

/// A contiguous slice of a source document.
///
/// Chunks borrow from the text they were cut from; `start` and `end` are
/// UTF-8 byte offsets into that text, `char_start` is the same position
/// counted in `char`s.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Zero-based position of the chunk in its sequence.
    pub index: usize,
    /// The chunk content.
    pub text: &'a str,
    /// Byte offset (inclusive) in the source text.
    pub start: usize,
    /// Byte offset (exclusive) in the source text.
    pub end: usize,
    /// Char offset (inclusive) in the source text.
    pub char_start: usize,
}

impl<'a> Chunk<'a> {
    pub(crate) fn from_span(index: usize, source: &'a str, start: usize, end: usize) -> Self {
        Self {
            index,
            text: &source[start..end],
            start,
            end,
            char_start: source[..start].chars().count(),
        }
    }

    /// Number of `char`s in the chunk.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte range of the chunk in the source text.
    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for Chunk<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_span_counts_chars_not_bytes() {
        let source = "héllo wörld";
        let start = "héllo ".len();
        let chunk = Chunk::from_span(3, source, start, source.len());
        assert_eq!(chunk.text, "wörld");
        assert_eq!(chunk.char_start, 6);
        assert_eq!(chunk.char_len(), 5);
        assert_eq!(chunk.byte_range(), start..source.len());
        assert_eq!(chunk.index, 3);
    }
}
