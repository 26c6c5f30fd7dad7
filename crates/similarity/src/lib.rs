//! Vector similarity for retrieval walkthroughs.
//!
//! ## What we do
//!
//! - Dot product, L2 norm and L2 normalization
//! - Cosine similarity clamped to `[-1, 1]`, and cosine distance
//! - Exact top-k search over a small in-memory corpus, optionally on rayon
//! - Reciprocal rank fusion and weighted score fusion for hybrid search
//! - An [`Embedder`] trait with a deterministic n-gram hashing embedder
//!
//! A zero-norm vector makes cosine undefined. Pairwise calls report it as
//! [`SimilarityError::ZeroNorm`]; search skips zero-norm documents and
//! rejects a zero-norm query.
//!
//! ```rust
//! use similarity::{top_k, Document, Embedder, NgramHashEmbedder};
//!
//! let embedder = NgramHashEmbedder::default();
//! let corpus: Vec<Document> = ["rust ownership", "tomato soup"]
//!     .iter()
//!     .map(|t| Document::new(*t, embedder.embed(t)))
//!     .collect();
//! let hits = top_k(&embedder.embed("ownership in rust"), &corpus, 1).unwrap();
//! assert_eq!(hits[0].id, "rust ownership");
//! ```

mod config;
mod cosine;
mod embed;
mod error;
mod fusion;
mod search;
mod vector;

pub use crate::config::SimilarityConfig;
pub use crate::cosine::{cosine_distance, cosine_similarity};
pub use crate::embed::{Embedder, NgramHashEmbedder};
pub use crate::error::SimilarityError;
pub use crate::fusion::{reciprocal_rank_fusion, weighted_fusion, DEFAULT_RRF_K};
pub use crate::search::{search, top_k, Document, SearchHit};
pub use crate::vector::{dot, l2_norm, l2_normalize_in_place, normalized};
