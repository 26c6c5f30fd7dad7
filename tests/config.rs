use std::io::Write;

use primer::{
    ChunkUnit, ConfigLoadError, PrimerConfig, SlidingWindow, TemperatureBand, hashing_embedder,
    retrieve,
};
use tempfile::NamedTempFile;

const WALKTHROUGH_YAML: &str = r#"
version: "1.0"
name: "integration"

probability:
  temperature: 0.3

similarity:
  top_k: 2
  ngram: 4
  dimensions: 128
  parallel: true

chunking:
  chunk_size: 80
  chunk_overlap: 16
  unit: "chars"

budget:
  chars_per_token: 3
  context_windows:
    - name: "small"
      tokens: 100
"#;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn file_config_drives_the_pipeline() {
    let file = write_config(WALKTHROUGH_YAML);
    let cfg = PrimerConfig::from_file(file.path()).unwrap();

    assert_eq!(cfg.name.as_deref(), Some("integration"));
    assert_eq!(cfg.probability.band(), TemperatureBand::Deterministic);
    assert_eq!(cfg.chunking.unit, ChunkUnit::Chars);
    assert_eq!(cfg.budget.context_windows.len(), 1);

    let embedder = hashing_embedder(&cfg).unwrap();
    let out = retrieve(
        primer::samples::RETRIEVAL_DOCUMENT,
        "chunk overlap",
        &embedder,
        &cfg,
    )
    .unwrap();
    assert_eq!(out.results.len(), 2);
    assert_eq!(out.temperature, 0.3);
    assert!(out.results.iter().all(|r| r.chunk.char_len() <= 80));
}

#[test]
fn overrides_apply_on_top_of_the_file() {
    let file = write_config(WALKTHROUGH_YAML);
    let mut cfg = PrimerConfig::from_file(file.path()).unwrap();
    cfg.apply_overrides([
        ("PRIMER_TEMPERATURE", "1.5"),
        ("PRIMER_CHUNK_SIZE", "30"),
        ("PRIMER_CHUNK_OVERLAP", "5"),
        ("UNRELATED_VARIABLE", "ignored"),
    ])
    .unwrap();

    assert_eq!(cfg.probability.temperature, 1.5);
    assert_eq!(cfg.similarity.top_k, 2);
    let window = SlidingWindow::new("abcdefghij".repeat(10).as_str(), &cfg.chunk_config())
        .unwrap()
        .count_chunks();
    assert_eq!(window, 4);
}

#[test]
fn overrides_that_break_the_window_are_rejected() {
    let file = write_config(WALKTHROUGH_YAML);
    let mut cfg = PrimerConfig::from_file(file.path()).unwrap();
    let err = cfg
        .apply_overrides([("PRIMER_CHUNK_OVERLAP", "80")])
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Validation(msg) if msg.starts_with("chunking:")));
}

#[test]
fn invalid_file_is_reported_with_its_stage() {
    let file = write_config("version: \"1.0\"\nprobability:\n  temperature: 0\n");
    let err = PrimerConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Validation(msg) if msg.starts_with("probability:")));
}

#[test]
fn written_config_loads_back() {
    let cfg = PrimerConfig::from_yaml(WALKTHROUGH_YAML).unwrap();
    let file = write_config(&cfg.to_yaml().unwrap());
    let loaded = PrimerConfig::load(Some(file.path())).unwrap();
    assert_eq!(loaded.similarity, cfg.similarity);
    assert_eq!(loaded.chunking, cfg.chunking);
}
