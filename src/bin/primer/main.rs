//! `primer`: print what softmax, cosine similarity, entropy and chunking do
//! to concrete inputs.
//!
//! ## Usage
//!
//! ```bash
//! primer walkthrough
//! primer softmax 2 1 0.1 --temperature 0.5
//! primer similarity --a 1,2,3 --b 2,3,4
//! primer entropy 0.9 0.05 0.03 0.02
//! primer cross-entropy --labels 1,0,0 --predicted 0.7,0.2,0.1
//! primer chunk --file notes.txt --size 200 --overlap 40 --unit chars
//! primer search --query "tomato sauce" --top-k 2
//! RUST_LOG=debug primer --config primer.yaml search --query "embeddings"
//! ```

mod walkthrough;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use primer::samples::{FIXED_SIZE_DOCUMENT, RETRIEVAL_DOCUMENT};
use primer::{
    ChunkUnit, PrimerConfig, SlidingWindow, collapse_whitespace, cosine_distance,
    cosine_similarity, cross_entropy, entropy, hashing_embedder, recursive_chunks, retrieve,
    sentence_chunks, softmax_with_temperature, token_estimate, tokenize,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::walkthrough::format_probs;

#[derive(Parser)]
#[command(
    name = "primer",
    version,
    about = "Softmax, cosine similarity, entropy and chunking walkthroughs"
)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Softmax of the given logits
    Softmax {
        #[arg(required = true, allow_negative_numbers = true)]
        logits: Vec<f64>,

        /// Overrides probability.temperature from the config
        #[arg(short, long)]
        temperature: Option<f64>,
    },

    /// Cosine similarity and distance of two vectors
    Similarity {
        /// First vector, comma separated
        #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
        a: Vec<f64>,

        /// Second vector, comma separated
        #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
        b: Vec<f64>,
    },

    /// Shannon entropy of a probability distribution
    Entropy {
        #[arg(required = true)]
        probs: Vec<f64>,
    },

    /// Cross-entropy loss of a prediction against labels
    CrossEntropy {
        #[arg(long, required = true, value_delimiter = ',')]
        labels: Vec<f64>,

        #[arg(long, required = true, value_delimiter = ',')]
        predicted: Vec<f64>,
    },

    /// Split a document into chunks
    Chunk {
        /// Text file to chunk (defaults to a built-in sample)
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Strategy::Window)]
        strategy: Strategy,

        /// Window size, or the size limit for the recursive strategy
        #[arg(long)]
        size: Option<usize>,

        /// Window overlap
        #[arg(long)]
        overlap: Option<usize>,

        #[arg(long, value_enum)]
        unit: Option<Unit>,

        /// Sentences per chunk for the sentence strategy
        #[arg(long, default_value_t = 2)]
        sentences: usize,
    },

    /// Character, word and token estimates for a text
    Tokens { text: String },

    /// Rank the chunks of a document against a query
    Search {
        #[arg(long)]
        query: String,

        /// Text file to search (defaults to a built-in sample)
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        top_k: Option<usize>,

        #[arg(short, long)]
        temperature: Option<f64>,
    },

    /// Run every demo section
    Walkthrough,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Window,
    Sentence,
    Recursive,
}

#[derive(Clone, Copy, ValueEnum)]
enum Unit {
    Chars,
    Tokens,
}

impl From<Unit> for ChunkUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Chars => ChunkUnit::Chars,
            Unit::Tokens => ChunkUnit::Tokens,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut cfg = PrimerConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Softmax {
            logits,
            temperature,
        } => {
            let t = temperature.unwrap_or(cfg.probability.temperature);
            let dist = softmax_with_temperature(&logits, t)?;
            if cli.json {
                return print_json(&dist);
            }
            println!("temperature: {t} ({:?})", primer::TemperatureBand::for_temperature(t));
            println!("softmax: {}", format_probs(&dist));
            println!("argmax: {}, entropy: {:.4} nats", dist.argmax(), dist.entropy());
        }
        Command::Similarity { a, b } => {
            let similarity = cosine_similarity(&a, &b)?;
            let distance = cosine_distance(&a, &b)?;
            if cli.json {
                return print_json(&serde_json::json!({
                    "similarity": similarity,
                    "distance": distance,
                }));
            }
            println!("cosine similarity: {similarity:.4}");
            println!("cosine distance:   {distance:.4}");
        }
        Command::Entropy { probs } => {
            let h = entropy(&probs)?;
            if cli.json {
                return print_json(&h);
            }
            println!(
                "entropy: {h:.4} nats (max for {} outcomes: {:.4})",
                probs.len(),
                (probs.len() as f64).ln()
            );
        }
        Command::CrossEntropy { labels, predicted } => {
            let loss = cross_entropy(&labels, &predicted)?;
            if cli.json {
                return print_json(&loss);
            }
            println!("cross-entropy: {loss:.4} nats");
        }
        Command::Chunk {
            file,
            strategy,
            size,
            overlap,
            unit,
            sentences,
        } => {
            let text = read_text(file.as_ref(), FIXED_SIZE_DOCUMENT)?;
            if let Some(size) = size {
                cfg.chunking.chunk_size = size;
            }
            if let Some(overlap) = overlap {
                cfg.chunking.chunk_overlap = overlap;
            }
            if let Some(unit) = unit {
                cfg.chunking.unit = unit.into();
            }
            let chunks = match strategy {
                Strategy::Window => SlidingWindow::new(&text, &cfg.chunk_config())?
                    .iter()
                    .collect(),
                Strategy::Sentence => sentence_chunks(&text, sentences)?,
                Strategy::Recursive => recursive_chunks(&text, cfg.chunk_config().chunk_chars())?,
            };
            if cli.json {
                return print_json(&chunks);
            }
            println!("{} chunks", chunks.len());
            for chunk in &chunks {
                println!(
                    "  [{}] chars {}..{}: {}",
                    chunk.index,
                    chunk.char_start,
                    chunk.char_start + chunk.char_len(),
                    collapse_whitespace(chunk.text)
                );
            }
        }
        Command::Tokens { text } => {
            let est = token_estimate(&text, cfg.budget.chars_per_token)?;
            if cli.json {
                return print_json(&est);
            }
            println!(
                "{} chars, {} words, ~{:.1} tokens",
                est.chars, est.words, est.tokens
            );
            let words: Vec<&str> = tokenize(&text).iter().map(|t| t.text).collect();
            println!("words: {words:?}");
            for window in &cfg.budget.context_windows {
                println!(
                    "  {:<14} {}",
                    window.name,
                    if window.fits(est.tokens) { "fits" } else { "too long" }
                );
            }
            let cost = cfg.budget.pricing.estimate_cost(est.tokens, 0.0);
            println!("input cost: ${:.6}", cost.total_cost());
        }
        Command::Search {
            query,
            file,
            top_k,
            temperature,
        } => {
            let text = read_text(file.as_ref(), RETRIEVAL_DOCUMENT)?;
            if let Some(k) = top_k {
                cfg.similarity.top_k = k;
            }
            if let Some(t) = temperature {
                cfg.probability.temperature = t;
            }
            if file.is_none() {
                cfg.chunking.unit = ChunkUnit::Chars;
                cfg.chunking.chunk_size = 200;
                cfg.chunking.chunk_overlap = 40;
            }
            let embedder = hashing_embedder(&cfg)?;
            let out = retrieve(&text, &query, &embedder, &cfg)?;
            if cli.json {
                return print_json(&out);
            }
            println!(
                "{} chunks indexed, showing {} (T={})",
                out.chunks_indexed,
                out.results.len(),
                out.temperature
            );
            for r in &out.results {
                println!(
                    "  #{} score={:.3} p={:.3}  {}",
                    r.hit.rank,
                    r.hit.score,
                    r.probability,
                    collapse_whitespace(r.chunk.text)
                );
            }
            println!(
                "entropy: {:.3} nats, confidence: {:.2}",
                out.entropy, out.confidence
            );
        }
        Command::Walkthrough => walkthrough::run(&cfg)?,
    }
    Ok(())
}

fn read_text(path: Option<&PathBuf>, fallback: &str) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => Ok(fallback.to_string()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
