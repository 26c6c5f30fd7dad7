use thiserror::Error;

/// Errors returned by the probability helpers.
///
/// Every variant describes a caller-supplied value that the math cannot
/// accept; nothing here is transient.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProbabilityError {
    #[error("input vector is empty")]
    EmptyInput,
    #[error("temperature must be finite and > 0 (got {temperature})")]
    InvalidTemperature { temperature: f64 },
    #[error("value at index {index} is not finite")]
    NonFinite { index: usize },
    #[error("probability at index {index} is negative ({value})")]
    Negative { index: usize, value: f64 },
    #[error("probabilities sum to {sum}, expected 1")]
    NotNormalized { sum: f64 },
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("class {class} out of range for {len} outcomes")]
    ClassOutOfRange { class: usize, len: usize },
    #[error("learning rate must be finite and > 0 (got {learning_rate})")]
    InvalidLearningRate { learning_rate: f64 },
    #[error("starting point must be finite (got {start})")]
    NonFiniteStart { start: f64 },
    /// Dividing by a tiny temperature pushed a logit past `f64::MAX`.
    #[error("logits overflow when scaled by 1/{temperature}")]
    Overflow { temperature: f64 },
}
