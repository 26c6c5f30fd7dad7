//! Search and embedder settings.
//!
//! Defaults are chosen for the walkthrough corpus: a handful of short
//! chunks, three results, character trigrams hashed into 256 buckets.

use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;

/// Configuration for [`crate::search`] and [`crate::NgramHashEmbedder`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Number of hits returned by a search.
    pub top_k: usize,
    /// Character n-gram length used by the hashing embedder.
    pub ngram: usize,
    /// Output dimensionality of the hashing embedder.
    pub dimensions: usize,
    /// Seed for n-gram hashing. Equal seeds give identical embeddings.
    pub seed: u64,
    /// Score documents on the rayon pool.
    pub parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            ngram: 3,
            dimensions: 256,
            seed: 0,
            parallel: false,
        }
    }
}

impl SimilarityConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_ngram(mut self, ngram: usize) -> Self {
        self.ngram = ngram;
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.top_k == 0 {
            return Err(SimilarityError::ZeroK);
        }
        if self.ngram == 0 {
            return Err(SimilarityError::InvalidConfig("ngram must be > 0".into()));
        }
        if self.dimensions == 0 {
            return Err(SimilarityError::InvalidConfig(
                "dimensions must be > 0".into(),
            ));
        }
        Ok(())
    }
}
