use serde::Serialize;

use crate::entropy::entropy_of;
use crate::error::ProbabilityError;

/// Allowed distance between the sum of a distribution and 1.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// A validated probability distribution.
///
/// Entries are finite, non-negative and sum to 1 within [`SUM_TOLERANCE`].
/// The only ways to obtain one are softmax and [`Distribution::new`], so
/// holders never need to re-check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution(Vec<f64>);

impl Distribution {
    /// Validate `probs` and wrap it.
    pub fn new(probs: Vec<f64>) -> Result<Self, ProbabilityError> {
        validate_distribution(&probs)?;
        Ok(Self(probs))
    }

    /// Uniform distribution over `n` outcomes.
    pub fn uniform(n: usize) -> Result<Self, ProbabilityError> {
        if n == 0 {
            return Err(ProbabilityError::EmptyInput);
        }
        Ok(Self(vec![1.0 / n as f64; n]))
    }

    /// Point mass (one-hot label) on `class` out of `n` outcomes.
    pub fn one_hot(n: usize, class: usize) -> Result<Self, ProbabilityError> {
        if n == 0 {
            return Err(ProbabilityError::EmptyInput);
        }
        if class >= n {
            return Err(ProbabilityError::ClassOutOfRange { class, len: n });
        }
        let mut probs = vec![0.0; n];
        probs[class] = 1.0;
        Ok(Self(probs))
    }

    /// Wrap a vector already normalized by softmax.
    pub(crate) fn from_normalized(probs: Vec<f64>) -> Self {
        debug_assert!(validate_distribution(&probs).is_ok());
        Self(probs)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Index of the most likely outcome; the first one wins ties.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (idx, &p) in self.0.iter().enumerate().skip(1) {
            if p > self.0[best] {
                best = idx;
            }
        }
        best
    }

    pub fn max_probability(&self) -> f64 {
        self.0[self.argmax()]
    }

    /// Shannon entropy in nats.
    pub fn entropy(&self) -> f64 {
        entropy_of(&self.0)
    }
}

impl AsRef<[f64]> for Distribution {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check that `probs` is non-empty, finite, non-negative and sums to 1.
pub(crate) fn validate_distribution(probs: &[f64]) -> Result<(), ProbabilityError> {
    validate_non_negative(probs)?;
    let sum: f64 = probs.iter().sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(ProbabilityError::NotNormalized { sum });
    }
    Ok(())
}

/// Check that `values` is non-empty, finite and non-negative.
pub(crate) fn validate_non_negative(values: &[f64]) -> Result<(), ProbabilityError> {
    if values.is_empty() {
        return Err(ProbabilityError::EmptyInput);
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ProbabilityError::NonFinite { index });
        }
        if value < 0.0 {
            return Err(ProbabilityError::Negative { index, value });
        }
    }
    Ok(())
}
