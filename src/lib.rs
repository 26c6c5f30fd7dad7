//! Workspace umbrella crate for the `primer` walkthrough tools.
//!
//! The numeric and text helpers live in their own crates and are re-exported
//! here: softmax, entropy, cross-entropy and gradient descent from
//! `probability`, cosine similarity, search and fusion from `similarity`, and
//! chunking plus token budgets from `chunking`. This crate adds what ties them together: the
//! [`PrimerError`] taxonomy, YAML configuration, and the [`retrieve`]
//! pipeline.
//!
//! ```rust
//! use primer::{retrieve, hashing_embedder, ChunkUnit, PrimerConfig};
//!
//! let mut cfg = PrimerConfig::default();
//! cfg.chunking.unit = ChunkUnit::Chars;
//! cfg.chunking.chunk_size = 120;
//! cfg.chunking.chunk_overlap = 20;
//!
//! let embedder = hashing_embedder(&cfg).unwrap();
//! let out = retrieve(primer::samples::RETRIEVAL_DOCUMENT, "python syntax", &embedder, &cfg).unwrap();
//! assert!(out.best().is_some());
//! ```

pub mod config;
mod error;
mod pipeline;
pub mod samples;

pub use chunking::{
    BudgetConfig, Chunk, ChunkConfig, ChunkError, ChunkUnit, Chunks, ContextWindow, CostEstimate,
    DEFAULT_CHARS_PER_TOKEN, Pricing, SlidingWindow, SplitLevel, Token, TokenEstimate,
    collapse_whitespace, default_context_windows, estimate_tokens, preview, recursive_chunks,
    sentence_chunks, split_sentences, stitch, token_estimate, tokenize, word_count,
};
pub use probability::{
    Attention, Descent, Distribution, GradientDescent, PROBABILITY_FLOOR, ProbabilityError,
    SUM_TOLERANCE, SamplingConfig, Step, TemperatureBand, attention, cross_entropy, entropy,
    scaled_dot_product_attention, softmax, softmax_rows, softmax_with_temperature,
    temperature_sweep,
};
pub use similarity::{
    DEFAULT_RRF_K, Document, Embedder, NgramHashEmbedder, SearchHit, SimilarityConfig,
    SimilarityError, cosine_distance, cosine_similarity, dot, l2_norm, l2_normalize_in_place,
    normalized, reciprocal_rank_fusion, search, top_k, weighted_fusion,
};

pub use crate::config::{ConfigLoadError, PrimerConfig};
pub use crate::error::{ErrorClass, PrimerError};
pub use crate::pipeline::{RetrievedChunk, Retrieval, hashing_embedder, retrieve};
