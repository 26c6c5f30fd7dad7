//! Cosine similarity and distance.

use crate::error::SimilarityError;
use crate::vector::{check_pair, Magnitude};

/// `dot(a, b) / (|a| * |b|)`, clamped to `[-1, 1]`.
///
/// A zero-norm side returns [`SimilarityError::ZeroNorm`] instead of NaN.
/// Both sides are divided by their largest component first, so any finite
/// non-zero pair has a finite cosine however large or small its values.
///
/// ```rust
/// use similarity::cosine_similarity;
///
/// let s = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
/// assert!((s - 0.9926).abs() < 1e-4);
/// ```
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    check_pair(a, b)?;
    let mag_a = Magnitude::of(a).ok_or(SimilarityError::ZeroNorm { operand: "left" })?;
    let mag_b = Magnitude::of(b).ok_or(SimilarityError::ZeroNorm { operand: "right" })?;
    cosine_scaled(a, mag_a, b, mag_b)
}

/// `1 - cosine_similarity(a, b)`, in `[0, 2]`.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    cosine_similarity(a, b).map(|s| 1.0 - s)
}

/// Cosine from precomputed magnitudes; lengths are already checked.
pub(crate) fn cosine_scaled(
    a: &[f64],
    mag_a: Magnitude,
    b: &[f64],
    mag_b: Magnitude,
) -> Result<f64, SimilarityError> {
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x / mag_a.scale) * (y / mag_b.scale))
        .sum();
    let cosine = dot / (mag_a.unit_norm * mag_b.unit_norm);
    if !cosine.is_finite() {
        return Err(SimilarityError::NonFiniteScore);
    }
    Ok(cosine.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pair() {
        let s = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]).unwrap();
        assert!((s - 0.9926).abs() < 1e-4);
    }

    #[test]
    fn self_and_opposite() {
        let v = [0.3, -1.7, 2.2, 0.01];
        let neg: Vec<f64> = v.iter().map(|x| -x).collect();
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&v, &neg).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn result_is_clamped() {
        // Rounding can push the raw ratio just past 1.
        let v = [0.1; 64];
        let s = cosine_similarity(&v, &v).unwrap();
        assert!(s <= 1.0);
    }

    #[test]
    fn orthogonal_and_distance() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
        assert_eq!(cosine_distance(&[1.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
        assert_eq!(cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]).unwrap(), 2.0);
    }

    #[test]
    fn zero_norm_is_reported() {
        assert_eq!(
            cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]),
            Err(SimilarityError::ZeroNorm { operand: "left" })
        );
        assert_eq!(
            cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]),
            Err(SimilarityError::ZeroNorm { operand: "right" })
        );
    }

    #[test]
    fn huge_components_do_not_overflow() {
        let v = [1e200, 1e200];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
        let s = cosine_similarity(&[1e200, 0.0], &[1e200, 1e200]).unwrap();
        assert!((s - 0.5f64.sqrt()).abs() < 1e-12);
        let max = [f64::MAX, -f64::MAX];
        assert!((cosine_similarity(&max, &max).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tiny_components_are_not_zero_norm() {
        let v = [1e-170, 2e-170];
        assert!((cosine_similarity(&v, &v).unwrap() - 1.0).abs() < 1e-12);
        let neg = [-1e-170, -2e-170];
        assert!((cosine_similarity(&v, &neg).unwrap() + 1.0).abs() < 1e-12);
        let sub = [f64::MIN_POSITIVE / 8.0, 0.0];
        assert_eq!(cosine_similarity(&sub, &[1.0, 0.0]).unwrap(), 1.0);
    }

    #[test]
    fn mixed_scales_stay_in_range() {
        let s = cosine_similarity(&[1e300, 1e-300], &[1e-300, 1e300]).unwrap();
        assert!((-1.0..=1.0).contains(&s));
        assert!(s.abs() < 1e-12);
    }

    #[test]
    fn invalid_shapes() {
        assert!(matches!(
            cosine_similarity(&[1.0, 2.0], &[1.0]),
            Err(SimilarityError::LengthMismatch { .. })
        ));
        assert_eq!(cosine_similarity(&[], &[]), Err(SimilarityError::EmptyInput));
    }
}
