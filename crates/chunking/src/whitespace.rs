//! Whitespace normalization for displaying chunks.
//!
//! Chunkers return raw slices of the source so offsets and reconstruction
//! stay exact. Printing those slices is nicer with newlines and indentation
//! folded away, which is what [`collapse_whitespace`] and [`preview`] do.
//!
//! ```rust
//! use chunking::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  hello \n\t world  "), "hello world");
//! ```

/// Collapses runs of Unicode whitespace into single spaces and trims edges.
///
/// Returns an empty string for empty or whitespace-only input.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Whitespace-collapsed prefix of at most `max_chars` chars, with `...`
/// appended when something was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    match collapsed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &collapsed[..cut]),
        None => collapsed,
    }
}
