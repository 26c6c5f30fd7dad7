//! Exact top-k search by cosine similarity.
//!
//! Every document is scored against the query; there is no index. Results
//! are sorted by descending score, ties keep corpus order, and ranks are
//! 1-based. Zero-norm documents cannot be scored and are skipped.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimilarityConfig;
use crate::cosine::cosine_scaled;
use crate::error::SimilarityError;
use crate::vector::{check_vector, Magnitude};

/// An embedded document in a search corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub embedding: Vec<f64>,
}

impl Document {
    pub fn new(id: impl Into<String>, embedding: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            embedding,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub id: String,
    /// 1-based position in the result list.
    pub rank: usize,
    pub score: f64,
    /// Position of the document in the searched corpus.
    pub index: usize,
}

/// Sequential top-k search.
///
/// ```rust
/// use similarity::{top_k, Document};
///
/// let corpus = vec![
///     Document::new("a", vec![1.0, 0.0]),
///     Document::new("b", vec![0.7, 0.7]),
/// ];
/// let hits = top_k(&[1.0, 0.1], &corpus, 1).unwrap();
/// assert_eq!(hits[0].id, "a");
/// ```
pub fn top_k(query: &[f64], corpus: &[Document], k: usize) -> Result<Vec<SearchHit>, SimilarityError> {
    rank(query, corpus, k, false)
}

/// Top-k search using `cfg.top_k` and `cfg.parallel`.
pub fn search(
    query: &[f64],
    corpus: &[Document],
    cfg: &SimilarityConfig,
) -> Result<Vec<SearchHit>, SimilarityError> {
    rank(query, corpus, cfg.top_k, cfg.parallel)
}

fn rank(
    query: &[f64],
    corpus: &[Document],
    k: usize,
    parallel: bool,
) -> Result<Vec<SearchHit>, SimilarityError> {
    if k == 0 {
        return Err(SimilarityError::ZeroK);
    }
    check_vector(query, "query")?;
    let query_mag = Magnitude::of(query).ok_or(SimilarityError::ZeroNorm { operand: "query" })?;

    let scored: Vec<Option<f64>> = if parallel {
        corpus
            .par_iter()
            .map(|doc| score_document(query, query_mag, doc))
            .collect::<Result<_, _>>()?
    } else {
        corpus
            .iter()
            .map(|doc| score_document(query, query_mag, doc))
            .collect::<Result<_, _>>()?
    };

    let mut hits: Vec<(usize, f64)> = scored
        .into_iter()
        .enumerate()
        .filter_map(|(idx, score)| score.map(|s| (idx, s)))
        .collect();
    let scored_count = hits.len();

    hits.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    hits.truncate(k);

    debug!(
        corpus = corpus.len(),
        scored = scored_count,
        returned = hits.len(),
        parallel,
        "top_k"
    );

    Ok(hits
        .into_iter()
        .enumerate()
        .map(|(pos, (index, score))| SearchHit {
            id: corpus[index].id.clone(),
            rank: pos + 1,
            score,
            index,
        })
        .collect())
}

/// `Ok(None)` for documents that cannot be scored.
fn score_document(
    query: &[f64],
    query_mag: Magnitude,
    doc: &Document,
) -> Result<Option<f64>, SimilarityError> {
    if doc.embedding.len() != query.len() {
        return Err(SimilarityError::LengthMismatch {
            left: query.len(),
            right: doc.embedding.len(),
        });
    }
    check_vector(&doc.embedding, "document")?;
    let Some(doc_mag) = Magnitude::of(&doc.embedding) else {
        debug!(id = %doc.id, "skipping zero-norm document");
        return Ok(None);
    };
    cosine_scaled(query, query_mag, &doc.embedding, doc_mag).map(Some)
}
