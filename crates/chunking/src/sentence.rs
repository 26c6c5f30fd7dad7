//! Sentence-based chunking.
//!
//! Sentence boundaries follow Unicode text segmentation (UAX #29), so
//! abbreviations and non-Latin punctuation are handled the same way on
//! every platform. Chunks group a fixed number of sentences; their sizes vary
//! with sentence length, which is the trade-off for never cutting a sentence
//! in half.

use unicode_segmentation::UnicodeSegmentation;

use crate::chunk::Chunk;
use crate::error::ChunkError;

/// Group `sentences_per_chunk` consecutive sentences into each chunk.
///
/// Chunk text spans from the first character of its first sentence to the
/// last non-whitespace character of its last sentence.
pub fn sentence_chunks(
    text: &str,
    sentences_per_chunk: usize,
) -> Result<Vec<Chunk<'_>>, ChunkError> {
    if sentences_per_chunk == 0 {
        return Err(ChunkError::ZeroSentencesPerChunk);
    }
    let spans = sentence_spans(text);
    Ok(spans
        .chunks(sentences_per_chunk)
        .enumerate()
        .map(|(index, group)| {
            let start = group[0].0;
            let end = group[group.len() - 1].1;
            Chunk::from_span(index, text, start, end)
        })
        .collect())
}

/// Sentences of `text` with surrounding whitespace trimmed.
pub fn split_sentences(text: &str) -> Vec<&str> {
    sentence_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect()
}

/// Trimmed byte spans of every non-blank sentence.
pub(crate) fn sentence_spans(text: &str) -> Vec<(usize, usize)> {
    text.split_sentence_bound_indices()
        .filter_map(|(start, sentence)| trimmed_span(text, start, start + sentence.len()))
        .collect()
}

/// Shrink `start..end` to exclude leading and trailing whitespace.
pub(crate) fn trimmed_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lead = slice.len() - slice.trim_start().len();
    Some((start + lead, start + lead + trimmed.len()))
}
