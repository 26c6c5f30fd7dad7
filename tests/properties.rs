use primer::{
    ChunkConfig, Distribution, SlidingWindow, cosine_similarity, entropy, softmax,
    softmax_with_temperature, stitch,
};

// Deterministic pseudo-random vectors so every run checks the same cases.
fn sample_vectors(count: usize, len: usize) -> Vec<Vec<f64>> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 20.0 - 10.0
    };
    (0..count)
        .map(|_| (0..len).map(|_| next()).collect())
        .collect()
}

#[test]
fn softmax_is_a_distribution_for_every_temperature() {
    let temperatures = [0.05, 0.3, 1.0, 2.5, 50.0];
    for logits in sample_vectors(40, 7) {
        for &t in &temperatures {
            let dist = softmax_with_temperature(&logits, t).unwrap();
            assert_eq!(dist.len(), logits.len());
            assert!(dist.iter().all(|&p| p >= 0.0), "negative entry at t={t}");
            let sum: f64 = dist.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "sum {sum} at t={t}");
        }
    }
}

#[test]
fn softmax_survives_large_logits() {
    let dist = softmax(&[1000.0, 1001.0, 1002.0]).unwrap();
    let sum: f64 = dist.iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
    assert_eq!(dist.argmax(), 2);
}

#[test]
fn higher_temperature_never_sharpens() {
    let temperatures = [0.1, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0];
    for logits in sample_vectors(25, 5) {
        let peaks: Vec<f64> = temperatures
            .iter()
            .map(|&t| softmax_with_temperature(&logits, t).unwrap().max_probability())
            .collect();
        for pair in peaks.windows(2) {
            assert!(pair[0] + 1e-12 >= pair[1], "{peaks:?}");
        }
    }
}

#[test]
fn reference_softmax_values() {
    let dist = softmax(&[2.0, 1.0, 0.1]).unwrap();
    let expected = [0.659, 0.242, 0.099];
    for (got, want) in dist.iter().zip(expected) {
        assert!((got - want).abs() < 1e-3, "{got} vs {want}");
    }
}

#[test]
fn cosine_of_vector_with_itself_and_its_negation() {
    for v in sample_vectors(40, 9) {
        let neg: Vec<f64> = v.iter().map(|x| -x).collect();
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-9);
        assert!((cosine_similarity(&v, &neg).unwrap() + 1.0).abs() < 1e-9);
    }
}

#[test]
fn cosine_holds_at_extreme_magnitudes() {
    for scale in [1e-300, 1e-170, 1e170, 1e300] {
        for v in sample_vectors(10, 5) {
            let v: Vec<f64> = v.iter().map(|x| x * scale).collect();
            let neg: Vec<f64> = v.iter().map(|x| -x).collect();
            let same = cosine_similarity(&v, &v).unwrap();
            let opposite = cosine_similarity(&v, &neg).unwrap();
            assert!((same - 1.0).abs() < 1e-9, "scale={scale} same={same}");
            assert!((opposite + 1.0).abs() < 1e-9, "scale={scale} opposite={opposite}");
        }
    }
}

#[test]
fn cosine_stays_in_range() {
    let vectors = sample_vectors(30, 4);
    for a in &vectors {
        for b in &vectors {
            let s = cosine_similarity(a, b).unwrap();
            assert!((-1.0..=1.0).contains(&s), "{s}");
        }
    }
}

#[test]
fn reference_cosine_value() {
    let s = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
    assert!((s - 0.9926).abs() < 1e-4, "{s}");
}

#[test]
fn uniform_entropy_is_ln_n() {
    for n in 1..=32 {
        let uniform = Distribution::uniform(n).unwrap();
        assert!((entropy(uniform.as_slice()).unwrap() - (n as f64).ln()).abs() < 1e-9);
    }
}

#[test]
fn point_mass_has_zero_entropy() {
    for n in 1..=16 {
        for class in 0..n {
            let point = Distribution::one_hot(n, class).unwrap();
            assert_eq!(entropy(point.as_slice()).unwrap(), 0.0);
        }
    }
}

#[test]
fn entropy_never_exceeds_ln_n() {
    for logits in sample_vectors(30, 6) {
        let dist = softmax(&logits).unwrap();
        let h = dist.entropy();
        assert!(h >= 0.0);
        assert!(h <= 6f64.ln() + 1e-12);
    }
}

#[test]
fn chunks_reconstruct_the_text() {
    let texts = [
        String::new(),
        "x".to_string(),
        "The quick brown fox jumps over the lazy dog. ".repeat(9),
        "naïve café ☕ über straße ".repeat(7),
    ];
    for text in &texts {
        for size in 1..=24 {
            for overlap in 0..size {
                let window = SlidingWindow::with_chars(text, size, overlap).unwrap();
                assert_eq!(
                    stitch(window.iter(), overlap),
                    *text,
                    "size={size} overlap={overlap}"
                );
                assert_eq!(window.iter().count(), window.count_chunks());
            }
        }
    }
}

#[test]
fn consecutive_chunks_share_the_overlap() {
    let text = "abcdefghijklmnopqrstuvwxyz".repeat(4);
    let window = SlidingWindow::with_chars(&text, 12, 5).unwrap();
    let chunks: Vec<_> = window.iter().collect();
    for pair in chunks.windows(2) {
        let tail: String = pair[0].text.chars().skip(12 - 5).collect();
        let head: String = pair[1].text.chars().take(5).collect();
        assert_eq!(tail, head);
    }
}

#[test]
fn reference_chunk_count() {
    let text = "y".repeat(220);
    let window = SlidingWindow::new(&text, &ChunkConfig::chars(50, 10)).unwrap();
    let chunks: Vec<_> = window.iter().collect();
    assert_eq!(chunks.len(), 6);
    let (last, rest) = chunks.split_last().unwrap();
    assert!(rest.iter().all(|c| c.char_len() == 50));
    assert!(last.char_len() <= 50);
}

#[test]
fn window_restarts_from_the_beginning() {
    let text = "0123456789".repeat(5);
    let window = SlidingWindow::with_chars(&text, 8, 3).unwrap();
    let first: Vec<_> = window.iter().collect();
    let second: Vec<_> = window.iter().collect();
    assert_eq!(first, second);
}
