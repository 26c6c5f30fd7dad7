//! Fixed-size chunking with overlap.
//!
//! The window walks the text in `char`s: every chunk starts `stride =
//! chunk_size - overlap` characters after the previous one, so neighbours
//! share exactly `overlap` characters. Iteration ends with the first chunk
//! that touches the end of the text, which keeps the tail from being
//! emitted twice.
//!
//! ```rust
//! use chunking::{stitch, SlidingWindow};
//!
//! let text = "a".repeat(220);
//! let window = SlidingWindow::with_chars(&text, 50, 10).unwrap();
//! assert_eq!(window.iter().count(), 6);
//! assert_eq!(window.count_chunks(), 6);
//! assert_eq!(stitch(window.iter(), 10), text);
//! ```

use std::iter::FusedIterator;

use tracing::debug;

use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// A validated sliding window over a borrowed text.
///
/// Building the window is the only fallible step; iterating never fails.
/// The window is restartable: every call to [`SlidingWindow::iter`] starts
/// over from the beginning of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindow<'a> {
    text: &'a str,
    size: usize,
    overlap: usize,
}

impl<'a> SlidingWindow<'a> {
    /// Build a window from a [`ChunkConfig`], converting token sizes to chars.
    pub fn new(text: &'a str, cfg: &ChunkConfig) -> Result<Self, ChunkError> {
        cfg.validate()?;
        Self::with_chars(text, cfg.chunk_chars(), cfg.overlap_chars())
    }

    /// Build a window with sizes given directly in `char`s.
    pub fn with_chars(text: &'a str, size: usize, overlap: usize) -> Result<Self, ChunkError> {
        if size == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        if overlap >= size {
            return Err(ChunkError::OverlapTooLarge {
                chunk_size: size,
                overlap,
            });
        }
        debug!(size, overlap, text_bytes = text.len(), "sliding_window");
        Ok(Self {
            text,
            size,
            overlap,
        })
    }

    /// Chunk size in chars.
    pub fn chunk_size(&self) -> usize {
        self.size
    }

    /// Overlap in chars.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance in chars between the starts of consecutive chunks. Always >= 1.
    pub fn stride(&self) -> usize {
        self.size - self.overlap
    }

    /// The text being chunked.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Number of chunks the window produces, without materializing them.
    pub fn count_chunks(&self) -> usize {
        let n = self.text.chars().count();
        if n == 0 {
            0
        } else if n <= self.size {
            1
        } else {
            1 + (n - self.size).div_ceil(self.stride())
        }
    }

    /// A fresh iterator over the chunks.
    pub fn iter(&self) -> Chunks<'a> {
        Chunks {
            text: self.text,
            size: self.size,
            stride: self.stride(),
            next_start: (!self.text.is_empty()).then_some(0),
            next_char: 0,
            index: 0,
        }
    }
}

impl<'a> IntoIterator for &SlidingWindow<'a> {
    type Item = Chunk<'a>;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for SlidingWindow<'a> {
    type Item = Chunk<'a>;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator produced by [`SlidingWindow::iter`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text: &'a str,
    size: usize,
    stride: usize,
    // Byte offset of the next chunk; `None` once the end has been emitted.
    next_start: Option<usize>,
    next_char: usize,
    index: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start?;
        let rest = &self.text[start..];
        let end = start + byte_offset_after(rest, self.size);

        let chunk = Chunk {
            index: self.index,
            text: &self.text[start..end],
            start,
            end,
            char_start: self.next_char,
        };

        if end == self.text.len() {
            self.next_start = None;
        } else {
            // The chunk stopped short of the end, so `rest` holds more than
            // `size` chars and the stride offset is inside it.
            self.next_start = Some(start + byte_offset_after(rest, self.stride));
            self.next_char += self.stride;
        }
        self.index += 1;
        Some(chunk)
    }
}

impl FusedIterator for Chunks<'_> {}

/// Byte offset just past the first `n` chars of `s`, or `s.len()`.
fn byte_offset_after(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

/// Rebuild the source text from overlapping chunks.
///
/// Keeps the first chunk whole and drops the leading `overlap` chars of
/// every later chunk.
pub fn stitch<'a, I>(chunks: I, overlap: usize) -> String
where
    I: IntoIterator<Item = Chunk<'a>>,
{
    let mut out = String::new();
    for chunk in chunks {
        if chunk.index == 0 {
            out.push_str(chunk.text);
        } else {
            let skip = byte_offset_after(chunk.text, overlap);
            out.push_str(&chunk.text[skip..]);
        }
    }
    out
}
