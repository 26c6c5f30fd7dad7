//! YAML configuration for the `primer` tools.
//!
//! One file configures every stage: temperature, search and embedder
//! settings, chunking, and the token budget used by the `tokens` walkthrough.
//! Every section and field is optional and falls back to the library
//! defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "walkthrough"
//!
//! probability:
//!   temperature: 0.7
//!
//! similarity:
//!   top_k: 3
//!   ngram: 3
//!   dimensions: 256
//!   seed: 0
//!   parallel: false
//!
//! chunking:
//!   chunk_size: 50
//!   chunk_overlap: 10
//!   unit: "chars"
//!   chars_per_token: 4
//!
//! budget:
//!   chars_per_token: 4
//!   pricing:
//!     input_per_1k: 0.0015
//!     output_per_1k: 0.002
//!   context_windows:
//!     - name: "GPT-4"
//!       tokens: 8192
//! ```
//!
//! ## Environment overrides
//!
//! [`PrimerConfig::apply_env_overrides`] reads `PRIMER_TEMPERATURE`,
//! `PRIMER_TOP_K`, `PRIMER_PARALLEL`, `PRIMER_CHUNK_SIZE`,
//! `PRIMER_CHUNK_OVERLAP`, `PRIMER_CHUNK_UNIT` and `PRIMER_CHARS_PER_TOKEN`.

use std::fs;
use std::path::Path;

use chunking::{BudgetConfig, ChunkConfig, ChunkUnit, DEFAULT_CHARS_PER_TOKEN};
use probability::SamplingConfig;
use serde::{Deserialize, Serialize};
use similarity::SimilarityConfig;
use thiserror::Error;

/// Prefix shared by every recognised environment override.
pub const ENV_PREFIX: &str = "PRIMER_";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: String, value: String },
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PrimerConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Temperature used when turning scores into probabilities
    #[serde(default)]
    pub probability: SamplingConfig,

    /// Search and embedder settings
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Sliding-window chunking
    #[serde(default)]
    pub chunking: ChunkingYamlConfig,

    /// Token estimate, context windows and pricing
    #[serde(default)]
    pub budget: BudgetConfig,
}

impl PrimerConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PrimerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// File (or defaults when `path` is `None`) followed by environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `PRIMER_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigLoadError> {
        self.apply_overrides(std::env::vars())
    }

    /// Apply `PRIMER_*` key/value pairs, then re-validate. Unknown keys are
    /// ignored.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> Result<(), ConfigLoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "TEMPERATURE" => self.probability.temperature = parse_override(key, value)?,
                "TOP_K" => self.similarity.top_k = parse_override(key, value)?,
                "PARALLEL" => self.similarity.parallel = parse_override(key, value)?,
                "CHUNK_SIZE" => self.chunking.chunk_size = parse_override(key, value)?,
                "CHUNK_OVERLAP" => self.chunking.chunk_overlap = parse_override(key, value)?,
                "CHARS_PER_TOKEN" => {
                    let cpt = parse_override(key, value)?;
                    self.chunking.chars_per_token = cpt;
                    self.budget.chars_per_token = cpt;
                }
                "CHUNK_UNIT" => {
                    self.chunking.unit = match value.to_ascii_lowercase().as_str() {
                        "chars" => ChunkUnit::Chars,
                        "tokens" => ChunkUnit::Tokens,
                        _ => return Err(invalid_override(key, value)),
                    }
                }
                _ => {}
            }
        }
        self.validate()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.probability
            .validate()
            .map_err(|err| stage_error("probability", err))?;
        self.similarity
            .validate()
            .map_err(|err| stage_error("similarity", err))?;
        self.chunking.validate()?;
        self.budget
            .validate()
            .map_err(|err| stage_error("budget", err))?;
        Ok(())
    }

    /// The sliding-window configuration for the chunking section.
    pub fn chunk_config(&self) -> ChunkConfig {
        self.chunking.to_chunk_config()
    }
}

impl Default for PrimerConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            probability: SamplingConfig::default(),
            similarity: SimilarityConfig::default(),
            chunking: ChunkingYamlConfig::default(),
            budget: BudgetConfig::default(),
        }
    }
}

/// Chunking section YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkingYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    #[serde(default)]
    pub unit: ChunkUnit,

    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,
}

impl ChunkingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_chunk_config()
            .validate()
            .map_err(|err| stage_error("chunking", err))
    }

    pub fn to_chunk_config(&self) -> ChunkConfig {
        ChunkConfig {
            version: self.version,
            chunk_size: self.chunk_size,
            chunk_overlap: self.chunk_overlap,
            unit: self.unit,
            chars_per_token: self.chars_per_token,
        }
    }
}

impl Default for ChunkingYamlConfig {
    fn default() -> Self {
        let cfg = ChunkConfig::default();
        Self {
            version: cfg.version,
            chunk_size: cfg.chunk_size,
            chunk_overlap: cfg.chunk_overlap,
            unit: cfg.unit,
            chars_per_token: cfg.chars_per_token,
        }
    }
}

fn stage_error(stage: &str, err: impl std::fmt::Display) -> ConfigLoadError {
    ConfigLoadError::Validation(format!("{stage}: {err}"))
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigLoadError> {
    value.parse().map_err(|_| invalid_override(key, value))
}

fn invalid_override(key: &str, value: &str) -> ConfigLoadError {
    ConfigLoadError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}

fn default_chunk_size() -> usize {
    ChunkConfig::default().chunk_size
}

fn default_chunk_overlap() -> usize {
    ChunkConfig::default().chunk_overlap
}

fn default_chars_per_token() -> usize {
    DEFAULT_CHARS_PER_TOKEN
}
