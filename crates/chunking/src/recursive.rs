//! Recursive chunking.
//!
//! Text is split on the coarsest boundary first (blank-line paragraphs).
//! Any piece still longer than the limit is split again on sentence
//! boundaries, then on words, and finally into fixed character windows, so
//! every piece fits. Neighbouring pieces are then merged back together for
//! as long as the merged span stays within the limit.

use tracing::debug;

use crate::chunk::Chunk;
use crate::error::ChunkError;
use crate::sentence::{sentence_spans, trimmed_span};
use crate::token::tokenize;

/// Boundary used at each level of the recursion, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SplitLevel {
    Paragraph,
    Sentence,
    Word,
    Char,
}

impl SplitLevel {
    fn finer(self) -> Option<Self> {
        match self {
            SplitLevel::Paragraph => Some(SplitLevel::Sentence),
            SplitLevel::Sentence => Some(SplitLevel::Word),
            SplitLevel::Word => Some(SplitLevel::Char),
            SplitLevel::Char => None,
        }
    }
}

/// Split `text` into chunks of at most `max_chars` chars, preferring
/// paragraph, then sentence, then word boundaries.
///
/// Chunks are returned in text order, do not overlap, and carry offsets into
/// `text`. Blank text produces no chunks.
pub fn recursive_chunks(text: &str, max_chars: usize) -> Result<Vec<Chunk<'_>>, ChunkError> {
    if max_chars == 0 {
        return Err(ChunkError::ZeroChunkSize);
    }

    let mut pieces = Vec::new();
    for span in split_at(text, (0, text.len()), SplitLevel::Paragraph, max_chars) {
        refine(text, span, SplitLevel::Sentence, max_chars, &mut pieces);
    }

    let merged = merge(text, &pieces, max_chars);
    debug!(
        pieces = pieces.len(),
        chunks = merged.len(),
        max_chars,
        "recursive_chunks"
    );
    Ok(merged
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| Chunk::from_span(index, text, start, end))
        .collect())
}

fn refine(
    text: &str,
    span: (usize, usize),
    level: SplitLevel,
    max_chars: usize,
    out: &mut Vec<(usize, usize)>,
) {
    if char_len(text, span) <= max_chars {
        out.push(span);
        return;
    }
    let parts = split_at(text, span, level, max_chars);
    match level.finer() {
        Some(next) => {
            for part in parts {
                refine(text, part, next, max_chars, out);
            }
        }
        None => out.extend(parts),
    }
}

fn split_at(
    text: &str,
    (start, end): (usize, usize),
    level: SplitLevel,
    max_chars: usize,
) -> Vec<(usize, usize)> {
    let slice = &text[start..end];
    let shift = |(s, e): (usize, usize)| (start + s, start + e);
    match level {
        SplitLevel::Paragraph => paragraph_spans(slice).into_iter().map(shift).collect(),
        SplitLevel::Sentence => sentence_spans(slice).into_iter().map(shift).collect(),
        SplitLevel::Word => tokenize(slice)
            .into_iter()
            .map(|t| shift((t.start, t.end)))
            .collect(),
        SplitLevel::Char => char_windows(slice, max_chars)
            .into_iter()
            .map(shift)
            .collect(),
    }
}

/// Trimmed spans of paragraphs separated by blank lines.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut para_start: Option<usize> = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(start) = para_start.take() {
                spans.extend(trimmed_span(text, start, offset));
            }
        } else if para_start.is_none() {
            para_start = Some(offset);
        }
        offset += line.len();
    }
    if let Some(start) = para_start {
        spans.extend(trimmed_span(text, start, text.len()));
    }
    spans
}

fn char_windows(text: &str, max_chars: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == max_chars {
            spans.push((start, idx));
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        spans.push((start, text.len()));
    }
    spans
}

/// Greedily join neighbouring pieces while the joined span fits.
fn merge(text: &str, pieces: &[(usize, usize)], max_chars: usize) -> Vec<(usize, usize)> {
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(pieces.len());
    for &(start, end) in pieces {
        match merged.last_mut() {
            Some(current) if char_len(text, (current.0, end)) <= max_chars => current.1 = end,
            _ => merged.push((start, end)),
        }
    }
    merged
}

fn char_len(text: &str, (start, end): (usize, usize)) -> usize {
    text[start..end].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Chunking splits documents for retrieval. Small chunks are precise.

Large chunks keep more context. Overlap helps neighbours share it.

Supercalifragilisticexpialidocious appears here.";

    #[test]
    fn short_paragraphs_merge_into_one_chunk() {
        let chunks = recursive_chunks(DOC, 10_000).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, DOC);
    }

    #[test]
    fn paragraphs_split_when_too_large() {
        let chunks = recursive_chunks(DOC, 70).unwrap();
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].text.starts_with("Chunking splits"));
        assert!(chunks[1].text.starts_with("Large chunks"));
        assert!(chunks[2].text.starts_with("Supercalifragilistic"));
    }

    #[test]
    fn every_chunk_respects_limit() {
        for max in [5, 12, 25, 40, 64] {
            let chunks = recursive_chunks(DOC, max).unwrap();
            assert!(!chunks.is_empty());
            for chunk in &chunks {
                assert!(chunk.char_len() <= max, "max={max} chunk={:?}", chunk.text);
                assert_eq!(&DOC[chunk.start..chunk.end], chunk.text);
            }
            for pair in chunks.windows(2) {
                assert!(pair[0].end <= pair[1].start);
                assert_eq!(pair[0].index + 1, pair[1].index);
            }
        }
    }

    #[test]
    fn long_word_falls_back_to_char_windows() {
        let chunks = recursive_chunks("abcdefghij", 4).unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn sentences_preferred_over_words() {
        let text = "One two three. Four five six.";
        let chunks = recursive_chunks(text, 16).unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["One two three.", "Four five six."]);
    }

    #[test]
    fn blank_text_and_zero_limit() {
        assert!(recursive_chunks("   \n\n  ", 10).unwrap().is_empty());
        assert_eq!(recursive_chunks("abc", 0), Err(ChunkError::ZeroChunkSize));
    }

    #[test]
    fn paragraph_spans_trim_blank_lines() {
        let text = "\n  first line\nstill first\n\n   \nsecond\n";
        let spans = paragraph_spans(text);
        let paras: Vec<&str> = spans.iter().map(|&(s, e)| &text[s..e]).collect();
        assert_eq!(paras, vec!["first line\nstill first", "second"]);
    }
}
