//! The `primer walkthrough` output: one section per helper, each printing
//! inputs, results and a short reading of the numbers.

use primer::samples::{FIXED_SIZE_DOCUMENT, RETRIEVAL_DOCUMENT, SENTENCE_DOCUMENT};
use primer::{
    ChunkConfig, ChunkUnit, Distribution, GradientDescent, PrimerConfig, PrimerError,
    SlidingWindow, TemperatureBand, cosine_similarity, cross_entropy, dot, entropy,
    hashing_embedder, preview, recursive_chunks, retrieve, scaled_dot_product_attention,
    sentence_chunks, softmax, temperature_sweep, token_estimate,
};

pub fn run(cfg: &PrimerConfig) -> Result<(), PrimerError> {
    similarity_section()?;
    gradient_section()?;
    softmax_section()?;
    attention_section()?;
    entropy_section()?;
    chunking_section()?;
    tokens_section(cfg)?;
    retrieval_section(cfg)?;
    Ok(())
}

fn heading(title: &str) {
    println!("\n=== {title} ===");
}

fn similarity_section() -> Result<(), PrimerError> {
    heading("Dot Product and Cosine Similarity");
    let v1 = [1.0, 2.0, 3.0];
    let v2 = [2.0, 3.0, 4.0];
    let v3 = [-1.0, -2.0, -3.0];
    println!("v1 = {v1:?}, v2 = {v2:?} (same direction), v3 = {v3:?} (opposite)");
    println!("dot(v1, v2) = {}", dot(&v1, &v2)?);
    println!("dot(v1, v3) = {}", dot(&v1, &v3)?);
    println!("cosine(v1, v2) = {:.4}", cosine_similarity(&v1, &v2)?);
    println!("cosine(v1, v3) = {:.4}", cosine_similarity(&v1, &v3)?);

    let ai = [0.8, 0.6, 0.4, 0.2];
    let ml = [0.7, 0.5, 0.5, 0.3];
    let cooking = [-0.2, -0.3, 0.1, 0.8];
    println!("\ncosine(AI, ML)      = {:.3}", cosine_similarity(&ai, &ml)?);
    println!("cosine(AI, cooking) = {:.3}", cosine_similarity(&ai, &cooking)?);
    println!("Close to 1 means the same direction, close to -1 the opposite one.");

    match cosine_similarity(&ai, &[0.0; 4]) {
        Err(err) => {
            let class = PrimerError::from(err.clone()).class();
            println!("cosine against a zero vector: {err} ({class:?})");
        }
        Ok(s) => println!("cosine against a zero vector: {s}"),
    }
    Ok(())
}

fn gradient_section() -> Result<(), PrimerError> {
    heading("Gradient Descent");
    let f = |x: f64| x * x;
    let grad = |x: f64| 2.0 * x;
    println!("Minimizing f(x) = x^2 from x = 5 with learning rate 0.1");
    for step in GradientDescent::new(f, grad, 5.0, 0.1)?.take(10) {
        println!(
            "  Step {:>2}: x = {:.3}, f(x) = {:.3}, gradient = {:.3}",
            step.step, step.x, step.value, step.gradient
        );
    }
    let run = GradientDescent::new(f, grad, 5.0, 0.1)?.run(1_000, 1e-6);
    println!(
        "Converged: {} after {} steps",
        run.converged,
        run.steps.len()
    );

    let overshoot = GradientDescent::new(f, grad, 5.0, 1.1)?.run(10, 1e-6);
    if let Some(last) = overshoot.last() {
        println!(
            "Learning rate 1.1 overshoots: x = {:.3} after {} steps",
            last.x,
            overshoot.steps.len()
        );
    }

    heading("Chain Rule");
    // y = g(f(x)) with f(x) = x^2 and g(u) = u + 1.
    let x = 3.0;
    let u = f(x);
    let y = u + 1.0;
    let dy_du = 1.0;
    let du_dx = grad(x);
    println!("Forward:  x = {x} -> f(x) = {u} -> g(f(x)) = {y}");
    println!(
        "Backward: dy/dx = dy/du * du/dx = {dy_du} * {du_dx} = {}",
        dy_du * du_dx
    );
    Ok(())
}

fn softmax_section() -> Result<(), PrimerError> {
    heading("Softmax and Temperature");
    let logits = [2.0, 1.0, 0.1];
    let probs = softmax(&logits)?;
    println!("logits = {logits:?}");
    println!("softmax = {}", format_probs(&probs));

    println!("\nTemperature sweep:");
    for (t, dist) in temperature_sweep(&logits, &[0.1, 0.5, 1.0, 2.0, 5.0])? {
        println!(
            "  T={t:<4} {}  max={:.3}",
            format_probs(&dist),
            dist.max_probability()
        );
    }

    println!("\nTemperature guidelines:");
    for band in TemperatureBand::ALL {
        println!("  {:<10} {}", band.range(), band.use_case());
    }
    Ok(())
}

fn attention_section() -> Result<(), PrimerError> {
    heading("Attention Weights");
    let q = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    let k = vec![vec![1.0, 0.5], vec![0.5, 1.0]];
    let v = vec![vec![10.0, 20.0], vec![30.0, 40.0]];
    let out = scaled_dot_product_attention(&q, &k, &v)?;
    println!("scores  = {:?}", out.scores);
    for (row, w) in out.weights.iter().enumerate() {
        println!("weights[{row}] = {}", format_probs(w));
    }
    for (row, o) in out.output.iter().enumerate() {
        println!("output[{row}]  = [{:.3}, {:.3}]", o[0], o[1]);
    }
    Ok(())
}

fn entropy_section() -> Result<(), PrimerError> {
    heading("Entropy and Cross-Entropy");
    let uniform = Distribution::uniform(4)?;
    let confident = [0.9, 0.05, 0.03, 0.02];
    println!("entropy(uniform)   = {:.3} nats (ln 4 = {:.3})", uniform.entropy(), 4f64.ln());
    println!("entropy(confident) = {:.3} nats", entropy(&confident)?);

    let label = Distribution::one_hot(4, 0)?;
    let bad = [0.1, 0.3, 0.3, 0.3];
    println!(
        "\ncross-entropy(label, confident) = {:.3}",
        cross_entropy(label.as_slice(), &confident)?
    );
    println!(
        "cross-entropy(label, bad)       = {:.3}",
        cross_entropy(label.as_slice(), &bad)?
    );
    println!("Lower loss means the prediction put more mass on the true class.");
    Ok(())
}

fn chunking_section() -> Result<(), PrimerError> {
    heading("Fixed-Size Chunking");
    let window = SlidingWindow::new(FIXED_SIZE_DOCUMENT, &ChunkConfig::chars(50, 10))?;
    println!(
        "Document length: {} characters",
        FIXED_SIZE_DOCUMENT.chars().count()
    );
    println!("Chunk size: 50, overlap: 10, chunks: {}", window.count_chunks());
    for chunk in &window {
        println!("  Chunk {}: {}", chunk.index + 1, preview(chunk.text, 50));
    }

    heading("Sentence-Based Chunking");
    for chunk in sentence_chunks(SENTENCE_DOCUMENT, 2)? {
        println!("  Chunk {}: {}", chunk.index + 1, chunk.text);
    }

    heading("Recursive Chunking");
    for chunk in recursive_chunks(RETRIEVAL_DOCUMENT, 200)? {
        println!(
            "  Chunk {} ({} chars): {}",
            chunk.index + 1,
            chunk.char_len(),
            preview(chunk.text, 60)
        );
    }
    Ok(())
}

fn tokens_section(cfg: &PrimerConfig) -> Result<(), PrimerError> {
    heading("Tokens, Context Windows and Cost");
    let budget = &cfg.budget;
    let text = "Hello, how are you?";
    let est = token_estimate(text, budget.chars_per_token)?;
    println!(
        "'{text}': {} chars, {} words, ~{:.1} tokens",
        est.chars, est.words, est.tokens
    );

    let long = "This is a sample text. ".repeat(100);
    let tokens = token_estimate(&long, budget.chars_per_token)?.tokens;
    println!("\nSample of {} characters is ~{tokens:.1} tokens", long.len());
    for window in &budget.context_windows {
        let mark = if window.fits(tokens) { "fits" } else { "too long" };
        println!(
            "  {:<14} {:>7} tokens: {mark} ({:.1} remaining)",
            window.name,
            window.tokens,
            window.remaining(tokens)
        );
    }

    let prompt = format!(
        "{}{}",
        "You are a helpful assistant.".repeat(10),
        "Explain quantum computing.".repeat(20)
    );
    let response = "Quantum computing is...".repeat(30);
    let cost = budget
        .pricing
        .estimate_text_cost(&prompt, &response, budget.chars_per_token)?;
    println!(
        "\nInput ~{:.0} tokens, output ~{:.0} tokens",
        cost.input_tokens, cost.output_tokens
    );
    println!(
        "Cost: input ${:.6}, output ${:.6}, total ${:.6}",
        cost.input_cost,
        cost.output_cost,
        cost.total_cost()
    );
    Ok(())
}

fn retrieval_section(cfg: &PrimerConfig) -> Result<(), PrimerError> {
    heading("Retrieval");
    let mut cfg = cfg.clone();
    cfg.chunking.unit = ChunkUnit::Chars;
    cfg.chunking.chunk_size = 200;
    cfg.chunking.chunk_overlap = 40;

    let embedder = hashing_embedder(&cfg)?;
    let query = "how does cosine similarity find relevant passages?";
    let out = retrieve(RETRIEVAL_DOCUMENT, query, &embedder, &cfg)?;
    println!("query: {query}");
    println!("{} chunks indexed, T={}", out.chunks_indexed, out.temperature);
    for r in &out.results {
        println!(
            "  #{} score={:.3} p={:.3}  {}",
            r.hit.rank,
            r.hit.score,
            r.probability,
            preview(r.chunk.text, 60)
        );
    }
    println!(
        "entropy={:.3} nats, confidence={:.2}",
        out.entropy, out.confidence
    );
    Ok(())
}

pub fn format_probs(dist: &Distribution) -> String {
    let parts: Vec<String> = dist.iter().map(|p| format!("{p:.3}")).collect();
    format!("[{}]", parts.join(", "))
}
