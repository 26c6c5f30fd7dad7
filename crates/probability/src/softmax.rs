//! Softmax with temperature scaling.
//!
//! Logits are divided by the temperature, shifted by their maximum and then
//! exponentiated. The shift does not change the result and keeps `exp` from
//! overflowing on large logits.
//!
//! ```rust
//! use probability::{softmax, softmax_with_temperature};
//!
//! let probs = softmax(&[2.0, 1.0, 0.1]).unwrap();
//! assert!((probs.as_slice()[0] - 0.659).abs() < 1e-3);
//!
//! let sharp = softmax_with_temperature(&[2.0, 1.0, 0.1], 0.5).unwrap();
//! let flat = softmax_with_temperature(&[2.0, 1.0, 0.1], 2.0).unwrap();
//! assert!(sharp.max_probability() > flat.max_probability());
//! ```

use tracing::debug;

use crate::distribution::Distribution;
use crate::error::ProbabilityError;

/// Softmax at temperature 1.
pub fn softmax(logits: &[f64]) -> Result<Distribution, ProbabilityError> {
    softmax_with_temperature(logits, 1.0)
}

/// Softmax of `logits / temperature`.
///
/// Lower temperatures sharpen the distribution toward the argmax, higher
/// ones flatten it toward uniform. `temperature` must be finite and > 0.
pub fn softmax_with_temperature(
    logits: &[f64],
    temperature: f64,
) -> Result<Distribution, ProbabilityError> {
    validate_temperature(temperature)?;
    if logits.is_empty() {
        return Err(ProbabilityError::EmptyInput);
    }
    if let Some(index) = logits.iter().position(|x| !x.is_finite()) {
        return Err(ProbabilityError::NonFinite { index });
    }

    let mut scaled: Vec<f64> = logits.iter().map(|&x| x / temperature).collect();
    if scaled.iter().any(|x| !x.is_finite()) {
        debug!(temperature, len = logits.len(), "softmax_overflow");
        return Err(ProbabilityError::Overflow { temperature });
    }

    let max = scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for x in scaled.iter_mut() {
        *x = (*x - max).exp();
    }
    // The max term contributes exp(0) = 1, so the sum is never zero.
    let sum: f64 = scaled.iter().sum();
    for x in scaled.iter_mut() {
        *x /= sum;
    }
    Ok(Distribution::from_normalized(scaled))
}

/// Row-wise softmax over a score matrix, as used for attention weights.
///
/// Rows may have different lengths but none may be empty.
pub fn softmax_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Vec<Distribution>, ProbabilityError> {
    if rows.is_empty() {
        return Err(ProbabilityError::EmptyInput);
    }
    rows.iter().map(|row| softmax(row.as_ref())).collect()
}

/// Softmax of the same logits at several temperatures.
pub fn temperature_sweep(
    logits: &[f64],
    temperatures: &[f64],
) -> Result<Vec<(f64, Distribution)>, ProbabilityError> {
    temperatures
        .iter()
        .map(|&t| softmax_with_temperature(logits, t).map(|dist| (t, dist)))
        .collect()
}

pub(crate) fn validate_temperature(temperature: f64) -> Result<(), ProbabilityError> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(ProbabilityError::InvalidTemperature { temperature });
    }
    Ok(())
}
