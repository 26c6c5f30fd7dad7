use thiserror::Error;

/// Errors that can occur while configuring or running a chunker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("chunk size must be >= 1")]
    ZeroChunkSize,
    #[error("chars_per_token must be >= 1")]
    ZeroCharsPerToken,
    /// A non-positive stride would never advance through the text.
    #[error("overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
    #[error("sentences_per_chunk must be >= 1")]
    ZeroSentencesPerChunk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_message_names_both_sizes() {
        let err = ChunkError::OverlapTooLarge {
            chunk_size: 50,
            overlap: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("overlap (50)"));
        assert!(msg.contains("chunk size (50)"));
    }

    #[test]
    fn invalid_config_carries_reason() {
        let err = ChunkError::InvalidConfig("version must be >= 1".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: version must be >= 1"
        );
    }
}
