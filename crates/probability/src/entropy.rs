//! Entropy and cross-entropy, in nats.

use crate::distribution::{validate_distribution, validate_non_negative};
use crate::error::ProbabilityError;

/// Lower clip applied to predicted probabilities before taking the log.
pub const PROBABILITY_FLOOR: f64 = 1e-15;

/// Shannon entropy `-sum(p * ln p)` of a probability distribution.
///
/// Zero-probability entries contribute nothing. The input must be
/// non-empty, non-negative and sum to 1.
pub fn entropy(probs: &[f64]) -> Result<f64, ProbabilityError> {
    validate_distribution(probs)?;
    Ok(entropy_of(probs))
}

pub(crate) fn entropy_of(probs: &[f64]) -> f64 {
    let h: f64 = -probs
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * p.ln())
        .sum::<f64>();
    // A point mass yields -0.0 and rounding can dip just below zero.
    h.max(0.0)
}

/// Cross-entropy loss `-sum(y * ln y_hat)`.
///
/// `labels` may be one-hot or soft; `predicted` is clipped to
/// `[PROBABILITY_FLOOR, 1]` so a confident wrong prediction costs about 34.5
/// nats instead of infinity.
pub fn cross_entropy(labels: &[f64], predicted: &[f64]) -> Result<f64, ProbabilityError> {
    if labels.len() != predicted.len() {
        return Err(ProbabilityError::LengthMismatch {
            left: labels.len(),
            right: predicted.len(),
        });
    }
    validate_non_negative(labels)?;
    validate_non_negative(predicted)?;

    let loss: f64 = -labels
        .iter()
        .zip(predicted)
        .map(|(&y, &y_hat)| y * y_hat.clamp(PROBABILITY_FLOOR, 1.0).ln())
        .sum::<f64>();
    Ok(loss.max(0.0))
}
