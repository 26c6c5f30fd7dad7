use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn primer(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_primer"));
    cmd.args(args).env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("PRIMER_") {
            cmd.env_remove(key);
        }
    }
    cmd.output().expect("failed to run primer binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn walkthrough_runs_every_section() {
    let out = primer(&["walkthrough"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    for heading in [
        "Dot Product and Cosine Similarity",
        "Gradient Descent",
        "Chain Rule",
    ] {
        assert!(text.contains(heading), "missing section {heading}");
    }
    assert!(text.contains("dy/dx = dy/du * du/dx = 1 * 6 = 6"));
}

#[test]
fn softmax_json_matches_reference_values() {
    let out = primer(&["softmax", "2", "1", "0.1", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let probs: Vec<f64> = serde_json::from_str(&stdout(&out)).unwrap();
    let expected = [0.659, 0.242, 0.099];
    assert_eq!(probs.len(), expected.len());
    for (got, want) in probs.iter().zip(expected) {
        assert!((got - want).abs() < 1e-3, "{got} vs {want}");
    }
}

#[test]
fn softmax_uses_config_temperature() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "probability:\n  temperature: 0.5").unwrap();
    let path = file.path().to_str().unwrap();

    let sharp = primer(&["--config", path, "softmax", "2", "1", "0.1", "--json"]);
    assert!(sharp.status.success(), "stderr: {}", stderr(&sharp));
    let probs: Vec<f64> = serde_json::from_str(&stdout(&sharp)).unwrap();
    assert!(probs[0] > 0.659 + 0.1);
}

#[test]
fn chunk_rejects_overlap_equal_to_size() {
    let out = primer(&["chunk", "--size", "10", "--overlap", "10", "--unit", "chars"]);
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("overlap (10) must be smaller than chunk size (10)"));
}

#[test]
fn similarity_reports_zero_norm() {
    let out = primer(&["similarity", "--a", "0,0", "--b", "1,2"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("left vector has zero norm"));
}

#[test]
fn similarity_json_for_orthogonal_vectors() {
    let out = primer(&["similarity", "--a", "1,0", "--b", "0,-1", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert!(value["similarity"].as_f64().unwrap().abs() < 1e-12);
    assert!((value["distance"].as_f64().unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn invalid_config_file_fails_before_running() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "chunking:\n  chunk_size: 10\n  chunk_overlap: 20").unwrap();
    let path = file.path().to_str().unwrap();

    let out = primer(&["--config", path, "tokens", "hello"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("loading configuration"));
}
