//! Text chunking for retrieval pipelines.
//!
//! Documents are cut into chunks before they are embedded and indexed. This
//! crate provides three strategies plus the token arithmetic used to size
//! them.
//!
//! ## What we do
//!
//! - Fixed-size chunking with overlap ([`SlidingWindow`]), lazy and
//!   restartable
//! - Sentence-based chunking ([`sentence_chunks`]) on Unicode sentence
//!   boundaries
//! - Recursive chunking ([`recursive_chunks`]): paragraphs, then sentences,
//!   then words, then characters
//! - Token, context-window and cost estimates ([`budget`])
//!
//! ## Invariants worth knowing
//!
//! - Sizes are counted in `char`s, never bytes; no chunk splits a code point
//! - Chunks borrow the source text and carry byte offsets into it
//! - `overlap >= chunk_size` is rejected up front, it would never advance
//! - Sliding-window chunks reconstruct the source exactly via [`stitch`]
//!
//! ```rust
//! use chunking::{ChunkConfig, SlidingWindow};
//!
//! let doc = "Fixed-size chunking splits the document into equal-sized pieces.";
//! let window = SlidingWindow::new(doc, &ChunkConfig::chars(20, 5)).unwrap();
//! for chunk in &window {
//!     assert!(chunk.char_len() <= 20);
//! }
//! ```

pub mod budget;
mod chunk;
mod config;
mod error;
mod recursive;
mod sentence;
mod token;
mod whitespace;
mod window;

pub use crate::budget::{
    default_context_windows, estimate_tokens, token_estimate, BudgetConfig, ContextWindow,
    CostEstimate, Pricing, TokenEstimate,
};
pub use crate::chunk::Chunk;
pub use crate::config::{ChunkConfig, ChunkUnit, DEFAULT_CHARS_PER_TOKEN};
pub use crate::error::ChunkError;
pub use crate::recursive::{recursive_chunks, SplitLevel};
pub use crate::sentence::{sentence_chunks, split_sentences};
pub use crate::token::{tokenize, word_count, Token};
pub use crate::whitespace::{collapse_whitespace, preview};
pub use crate::window::{stitch, Chunks, SlidingWindow};
