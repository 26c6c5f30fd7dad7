use thiserror::Error;

/// Errors returned by the vector and search helpers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("input vector is empty")]
    EmptyInput,
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("{operand} vector has a non-finite value at index {index}")]
    NonFinite { operand: &'static str, index: usize },
    /// Cosine is undefined when either side has zero length.
    #[error("{operand} vector has zero norm")]
    ZeroNorm { operand: &'static str },
    /// The cosine came out NaN or infinite.
    #[error("cosine similarity is not finite")]
    NonFiniteScore,
    #[error("k must be at least 1")]
    ZeroK,
    #[error("fusion weight must be within [0, 1] (got {weight})")]
    InvalidWeight { weight: f64 },
    #[error("invalid similarity config: {0}")]
    InvalidConfig(String),
}

impl SimilarityError {
    /// True when the input is well-formed but the math is undefined for it.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            SimilarityError::ZeroNorm { .. } | SimilarityError::NonFiniteScore
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_results_are_degenerate() {
        assert!(SimilarityError::ZeroNorm { operand: "query" }.is_degenerate());
        assert!(SimilarityError::NonFiniteScore.is_degenerate());
        assert!(!SimilarityError::EmptyInput.is_degenerate());
        assert!(!SimilarityError::ZeroK.is_degenerate());
        assert!(!SimilarityError::LengthMismatch { left: 1, right: 2 }.is_degenerate());
    }

    #[test]
    fn messages_name_the_operand() {
        let err = SimilarityError::ZeroNorm { operand: "right" };
        assert_eq!(err.to_string(), "right vector has zero norm");

        let err = SimilarityError::NonFinite {
            operand: "query",
            index: 3,
        };
        assert!(err.to_string().contains("index 3"));

        let err = SimilarityError::InvalidConfig("dimensions must be > 0".into());
        assert!(err.to_string().contains("dimensions"));
    }
}
