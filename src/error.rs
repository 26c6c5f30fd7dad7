use chunking::ChunkError;
use probability::ProbabilityError;
use similarity::SimilarityError;
use thiserror::Error;

use crate::config::ConfigLoadError;

/// Errors surfaced by the umbrella crate.
///
/// Each crate error converts with `?`. Callers that only care whether the
/// input was malformed or merely degenerate can use [`PrimerError::class`].
#[derive(Debug, Error)]
pub enum PrimerError {
    #[error("probability: {0}")]
    Probability(#[from] ProbabilityError),
    #[error("similarity: {0}")]
    Similarity(#[from] SimilarityError),
    #[error("chunking: {0}")]
    Chunking(#[from] ChunkError),
    #[error("config: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("document produced no chunks")]
    EmptyDocument,
    /// Every chunk embedded to the zero vector, so nothing could be ranked.
    #[error("no chunk could be scored against the query")]
    NoScorableChunks,
}

/// The two kinds of failure every operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The caller passed a value outside the operation's domain: a
    /// non-positive temperature, `overlap >= chunk_size`, an empty vector,
    /// mismatched lengths, `k == 0` or an invalid configuration.
    InvalidParameter,
    /// The input is well-formed but the quantity is undefined for it, such
    /// as the cosine of a zero-norm vector.
    DegenerateInput,
}

impl PrimerError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PrimerError::Similarity(err) if err.is_degenerate() => ErrorClass::DegenerateInput,
            PrimerError::NoScorableChunks => ErrorClass::DegenerateInput,
            PrimerError::Probability(_)
            | PrimerError::Similarity(_)
            | PrimerError::Chunking(_)
            | PrimerError::Config(_)
            | PrimerError::EmptyDocument => ErrorClass::InvalidParameter,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.class() == ErrorClass::DegenerateInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_norm_is_degenerate() {
        let err = PrimerError::from(SimilarityError::ZeroNorm { operand: "left" });
        assert_eq!(err.class(), ErrorClass::DegenerateInput);
        assert!(err.is_degenerate());
        assert!(PrimerError::NoScorableChunks.is_degenerate());
        assert!(PrimerError::from(SimilarityError::NonFiniteScore).is_degenerate());
    }

    #[test]
    fn everything_else_is_invalid_parameter() {
        let errors = [
            PrimerError::from(ProbabilityError::InvalidTemperature { temperature: 0.0 }),
            PrimerError::from(ChunkError::OverlapTooLarge {
                chunk_size: 10,
                overlap: 10,
            }),
            PrimerError::from(SimilarityError::ZeroK),
            PrimerError::from(SimilarityError::LengthMismatch { left: 2, right: 3 }),
            PrimerError::from(ConfigLoadError::Validation("bad".into())),
            PrimerError::EmptyDocument,
        ];
        for err in errors {
            assert_eq!(err.class(), ErrorClass::InvalidParameter, "{err}");
        }
    }

    #[test]
    fn messages_keep_the_source() {
        let err = PrimerError::from(ProbabilityError::EmptyInput);
        assert_eq!(err.to_string(), "probability: input vector is empty");
    }
}
