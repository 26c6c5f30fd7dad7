//! Chunk, embed, rank, then turn the ranking into probabilities.

use std::time::Instant;

use chunking::{Chunk, SlidingWindow};
use probability::{Distribution, softmax_with_temperature};
use serde::Serialize;
use similarity::{Document, Embedder, NgramHashEmbedder, SearchHit, search};
use tracing::{Level, info, warn};

use crate::config::PrimerConfig;
use crate::error::PrimerError;

/// A ranked chunk and its share of the softmax over hit scores.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedChunk<'a> {
    pub hit: SearchHit,
    pub chunk: Chunk<'a>,
    pub probability: f64,
}

/// Result of [`retrieve`]. Chunks borrow the searched document.
#[derive(Debug, Clone, Serialize)]
pub struct Retrieval<'a> {
    /// Number of chunks the document was cut into.
    pub chunks_indexed: usize,
    pub temperature: f64,
    /// Hits in rank order.
    pub results: Vec<RetrievedChunk<'a>>,
    /// Softmax of the hit scores at `temperature`, in rank order.
    pub distribution: Distribution,
    /// Entropy of `distribution`, in nats. Low means one chunk dominates.
    pub entropy: f64,
    /// `1 - entropy / ln(n)`: 1 for a single clear winner, 0 when every hit
    /// is equally likely.
    pub confidence: f64,
}

impl<'a> Retrieval<'a> {
    pub fn best(&self) -> Option<&RetrievedChunk<'a>> {
        self.results.first()
    }
}

/// Retrieve the chunks of `document` most similar to `query`.
///
/// 1. Cut `document` with the sliding window from `cfg.chunking`.
/// 2. Embed every chunk and the query with `embedder`.
/// 3. Keep the `cfg.similarity.top_k` chunks by cosine similarity.
/// 4. Softmax the hit scores at `cfg.probability.temperature`.
///
/// Blank chunks embed to the zero vector and are never returned. A blank
/// query is a degenerate input.
pub fn retrieve<'a, E>(
    document: &'a str,
    query: &str,
    embedder: &E,
    cfg: &PrimerConfig,
) -> Result<Retrieval<'a>, PrimerError>
where
    E: Embedder + ?Sized,
{
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "primer.retrieve",
        document_bytes = document.len(),
        top_k = cfg.similarity.top_k,
        temperature = cfg.probability.temperature
    );
    let _guard = span.enter();

    match retrieve_inner(document, query, embedder, cfg) {
        Ok(retrieval) => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                chunks = retrieval.chunks_indexed,
                hits = retrieval.results.len(),
                entropy = retrieval.entropy,
                elapsed_micros,
                "retrieve_success"
            );
            Ok(retrieval)
        }
        Err(err) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(error = %err, class = ?err.class(), elapsed_micros, "retrieve_failure");
            Err(err)
        }
    }
}

fn retrieve_inner<'a, E>(
    document: &'a str,
    query: &str,
    embedder: &E,
    cfg: &PrimerConfig,
) -> Result<Retrieval<'a>, PrimerError>
where
    E: Embedder + ?Sized,
{
    let window = SlidingWindow::new(document, &cfg.chunk_config())?;
    let chunks: Vec<Chunk<'a>> = window.iter().collect();
    if chunks.is_empty() {
        return Err(PrimerError::EmptyDocument);
    }

    let corpus: Vec<Document> = chunks
        .iter()
        .map(|chunk| Document::new(format!("chunk-{}", chunk.index), embedder.embed(chunk.text)))
        .collect();
    let hits = search(&embedder.embed(query), &corpus, &cfg.similarity)?;
    if hits.is_empty() {
        return Err(PrimerError::NoScorableChunks);
    }

    let temperature = cfg.probability.temperature;
    let scores: Vec<f64> = hits.iter().map(|hit| hit.score).collect();
    let distribution = softmax_with_temperature(&scores, temperature)?;
    let entropy = distribution.entropy();

    let results = hits
        .into_iter()
        .zip(distribution.iter())
        .map(|(hit, &probability)| RetrievedChunk {
            chunk: chunks[hit.index],
            hit,
            probability,
        })
        .collect();

    Ok(Retrieval {
        chunks_indexed: chunks.len(),
        temperature,
        results,
        confidence: confidence(entropy, distribution.len()),
        distribution,
        entropy,
    })
}

/// The n-gram hashing embedder described by `cfg.similarity`.
pub fn hashing_embedder(cfg: &PrimerConfig) -> Result<NgramHashEmbedder, PrimerError> {
    Ok(NgramHashEmbedder::from_config(&cfg.similarity)?)
}

fn confidence(entropy: f64, outcomes: usize) -> f64 {
    if outcomes < 2 {
        return 1.0;
    }
    (1.0 - entropy / (outcomes as f64).ln()).clamp(0.0, 1.0)
}
