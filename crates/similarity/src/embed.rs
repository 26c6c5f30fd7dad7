//! Embedding seam and a deterministic hashing embedder.
//!
//! [`NgramHashEmbedder`] stands in for a real embedding model in the
//! walkthroughs. Lowercased character n-grams are hashed with xxh3 into a
//! fixed number of signed buckets, and the result is L2-normalized. Texts that
//! share many n-grams end up with a high cosine similarity.

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::config::SimilarityConfig;
use crate::error::SimilarityError;
use crate::vector::l2_normalize_in_place;

/// Anything that turns text into a fixed-length vector.
pub trait Embedder {
    /// Length of every vector returned by [`Embedder::embed`].
    fn dimensions(&self) -> usize;

    fn embed(&self, text: &str) -> Vec<f64>;

    fn embed_batch(&self, texts: &[&str]) -> Vec<Vec<f64>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }
}

/// Feature-hashing embedder over character n-grams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NgramHashEmbedder {
    ngram: usize,
    dimensions: usize,
    seed: u64,
}

impl NgramHashEmbedder {
    pub fn new(ngram: usize, dimensions: usize, seed: u64) -> Result<Self, SimilarityError> {
        if ngram == 0 {
            return Err(SimilarityError::InvalidConfig("ngram must be > 0".into()));
        }
        if dimensions == 0 {
            return Err(SimilarityError::InvalidConfig(
                "dimensions must be > 0".into(),
            ));
        }
        Ok(Self {
            ngram,
            dimensions,
            seed,
        })
    }

    pub fn from_config(cfg: &SimilarityConfig) -> Result<Self, SimilarityError> {
        Self::new(cfg.ngram, cfg.dimensions, cfg.seed)
    }

    pub fn ngram(&self) -> usize {
        self.ngram
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for NgramHashEmbedder {
    fn default() -> Self {
        let cfg = SimilarityConfig::default();
        Self {
            ngram: cfg.ngram,
            dimensions: cfg.dimensions,
            seed: cfg.seed,
        }
    }
}

impl Embedder for NgramHashEmbedder {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Blank text maps to the zero vector.
    fn embed(&self, text: &str) -> Vec<f64> {
        let mut out = vec![0.0; self.dimensions];
        let normalized = text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            return out;
        }

        // Byte offsets of every char plus the end, so n-grams slice cleanly.
        let bounds: Vec<usize> = normalized
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(normalized.len()))
            .collect();
        let chars = bounds.len() - 1;
        let n = self.ngram.min(chars);

        for start in 0..=(chars - n) {
            let gram = &normalized[bounds[start]..bounds[start + n]];
            let h = xxh3_64_with_seed(gram.as_bytes(), self.seed);
            let bucket = (h % self.dimensions as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            out[bucket] += sign;
        }

        l2_normalize_in_place(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosine::cosine_similarity;
    use crate::vector::l2_norm;

    #[test]
    fn embeddings_are_deterministic_and_unit_length() {
        let embedder = NgramHashEmbedder::default();
        let a = embedder.embed("Python is a programming language");
        let b = embedder.embed("Python is a programming language");
        assert_eq!(a, b);
        assert_eq!(a.len(), 256);
        assert!((l2_norm(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn case_and_spacing_do_not_matter() {
        let embedder = NgramHashEmbedder::default();
        assert_eq!(
            embedder.embed("Vector   Search"),
            embedder.embed("vector search")
        );
    }

    #[test]
    fn related_text_scores_higher() {
        let embedder = NgramHashEmbedder::default();
        let query = embedder.embed("python programming");
        let close = embedder.embed("programming in python is fun");
        let far = embedder.embed("slow cooked tomato sauce recipe");
        let s_close = cosine_similarity(&query, &close).unwrap();
        let s_far = cosine_similarity(&query, &far).unwrap();
        assert!(s_close > s_far, "{s_close} <= {s_far}");
    }

    #[test]
    fn short_and_blank_text() {
        let embedder = NgramHashEmbedder::new(5, 16, 7).unwrap();
        let short = embedder.embed("hé");
        assert!((l2_norm(&short) - 1.0).abs() < 1e-12);
        assert_eq!(embedder.embed("   "), vec![0.0; 16]);
    }

    #[test]
    fn seed_changes_the_embedding() {
        let a = NgramHashEmbedder::new(3, 64, 1).unwrap();
        let b = NgramHashEmbedder::new(3, 64, 2).unwrap();
        assert_ne!(a.embed("retrieval"), b.embed("retrieval"));
    }

    #[test]
    fn invalid_parameters() {
        assert!(NgramHashEmbedder::new(0, 8, 0).is_err());
        assert!(NgramHashEmbedder::new(3, 0, 0).is_err());
        let cfg = SimilarityConfig::default().with_dimensions(32);
        assert_eq!(NgramHashEmbedder::from_config(&cfg).unwrap().dimensions(), 32);
    }

    #[test]
    fn batch_matches_single() {
        let embedder = NgramHashEmbedder::default();
        let batch = embedder.embed_batch(&["alpha", "beta"]);
        assert_eq!(batch[1], embedder.embed("beta"));
    }
}
