//! Configuration types for the chunking layer.
//!
//! This module defines [`ChunkConfig`], which controls how large each chunk
//! is, how much neighbouring chunks share, and which unit those sizes are
//! expressed in.
//!
//! # Units
//!
//! Retrieval guides usually quote chunk sizes in tokens ("512-1024 tokens,
//! 10-20% overlap"), while the arithmetic itself walks characters. A
//! [`ChunkUnit::Tokens`] size is converted to characters with the fixed
//! `chars_per_token` ratio (4 for English text by default). There is no real
//! tokenizer involved; the ratio is an estimate.
//!
//! # Examples
//!
//! ```rust
//! use chunking::{ChunkConfig, ChunkUnit};
//!
//! let config = ChunkConfig::default();
//! assert_eq!(config.unit, ChunkUnit::Tokens);
//! assert_eq!(config.chunk_chars(), 512 * 4);
//!
//! let chars = ChunkConfig::chars(50, 10);
//! assert_eq!(chars.stride().unwrap(), 40);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ChunkError;

/// Default character-to-token ratio for English text.
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Unit in which [`ChunkConfig::chunk_size`] and
/// [`ChunkConfig::chunk_overlap`] are expressed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChunkUnit {
    /// Sizes are Unicode scalar values (`char`s).
    Chars,
    /// Sizes are approximate tokens, converted via `chars_per_token`.
    #[default]
    Tokens,
}

/// Configuration for the sliding-window chunker.
///
/// `ChunkConfig` is cheap to clone and serde-friendly so it can be embedded
/// in the YAML configuration of the umbrella crate.
///
/// # Validation
///
/// [`ChunkConfig::validate`] rejects:
///
/// - `version == 0` (reserved)
/// - `chunk_size == 0`
/// - `chars_per_token == 0`
/// - `chunk_overlap >= chunk_size`, which would make the window stride
///   zero or negative and the chunker would never reach the end of the text
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "chunk_size": 512,
///   "chunk_overlap": 64,
///   "unit": "tokens",
///   "chars_per_token": 4
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Configuration schema version. Must be >= 1.
    pub version: u32,
    /// Target size of every chunk, in `unit`s.
    ///
    /// All chunks have exactly this size except possibly the last one.
    pub chunk_size: usize,
    /// Number of `unit`s shared by consecutive chunks.
    ///
    /// Must be strictly smaller than `chunk_size`.
    pub chunk_overlap: usize,
    /// Unit of `chunk_size` and `chunk_overlap`.
    #[serde(default)]
    pub unit: ChunkUnit,
    /// Characters per token used to convert [`ChunkUnit::Tokens`] sizes.
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,
}

fn default_chars_per_token() -> usize {
    DEFAULT_CHARS_PER_TOKEN
}

impl ChunkConfig {
    /// Create a configuration with sizes in characters.
    pub fn chars(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            unit: ChunkUnit::Chars,
            ..Self::default()
        }
    }

    /// Create a configuration with sizes in approximate tokens.
    pub fn tokens(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            unit: ChunkUnit::Tokens,
            ..Self::default()
        }
    }

    /// Set the character-to-token ratio.
    pub fn with_chars_per_token(mut self, chars_per_token: usize) -> Self {
        self.chars_per_token = chars_per_token;
        self
    }

    /// Set the configuration version.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Chunk size converted to characters.
    pub fn chunk_chars(&self) -> usize {
        self.to_chars(self.chunk_size)
    }

    /// Overlap converted to characters.
    pub fn overlap_chars(&self) -> usize {
        self.to_chars(self.chunk_overlap)
    }

    /// Number of characters the window advances between chunks.
    ///
    /// Returns an error instead of a non-positive stride.
    pub fn stride(&self) -> Result<usize, ChunkError> {
        self.validate()?;
        Ok(self.chunk_chars() - self.overlap_chars())
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.version == 0 {
            return Err(ChunkError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        if self.unit == ChunkUnit::Tokens && self.chars_per_token == 0 {
            return Err(ChunkError::ZeroCharsPerToken);
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ChunkError::OverlapTooLarge {
                chunk_size: self.chunk_size,
                overlap: self.chunk_overlap,
            });
        }
        // The overlap is smaller, so a size that converts means both do.
        if self.unit == ChunkUnit::Tokens
            && self.chunk_size.checked_mul(self.chars_per_token).is_none()
        {
            return Err(ChunkError::InvalidConfig(format!(
                "{} tokens at {} chars per token overflows the char count",
                self.chunk_size, self.chars_per_token
            )));
        }
        Ok(())
    }

    fn to_chars(&self, size: usize) -> usize {
        match self.unit {
            ChunkUnit::Chars => size,
            ChunkUnit::Tokens => size.saturating_mul(self.chars_per_token),
        }
    }
}

impl Default for ChunkConfig {
    /// 512 tokens with a 64-token (12.5%) overlap at 4 chars per token.
    fn default() -> Self {
        Self {
            version: 1,
            chunk_size: 512,
            chunk_overlap: 64,
            unit: ChunkUnit::Tokens,
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}
