//! Dense vector basics over `f64`.

use crate::error::SimilarityError;

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    check_pair(a, b)?;
    Ok(dot_unchecked(a, b))
}

/// Euclidean length.
///
/// Components are divided by the largest magnitude before squaring, so the
/// result neither overflows nor flushes to zero unless the true norm does.
pub fn l2_norm(v: &[f64]) -> f64 {
    if v.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    let scale = max_abs(v);
    if scale == 0.0 || scale.is_infinite() {
        return scale;
    }
    scale * unit_norm(v, scale)
}

/// In-place L2 normalization. A zero vector is left untouched, as is one
/// holding a non-finite component.
pub fn l2_normalize_in_place(v: &mut [f64]) {
    let Some(mag) = Magnitude::of(v) else {
        return;
    };
    for x in v.iter_mut() {
        *x = (*x / mag.scale) / mag.unit_norm;
    }
}

/// Unit-length copy of `v`.
pub fn normalized(v: &[f64]) -> Result<Vec<f64>, SimilarityError> {
    check_vector(v, "input")?;
    if Magnitude::of(v).is_none() {
        return Err(SimilarityError::ZeroNorm { operand: "input" });
    }
    let mut out = v.to_vec();
    l2_normalize_in_place(&mut out);
    Ok(out)
}

/// Length of a vector split into its largest component magnitude and the
/// norm of the vector divided by it.
///
/// `unit_norm` lies in `[1, sqrt(len)]` for every finite non-zero vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Magnitude {
    pub(crate) scale: f64,
    pub(crate) unit_norm: f64,
}

impl Magnitude {
    /// `None` for the zero vector and for vectors with non-finite values.
    pub(crate) fn of(v: &[f64]) -> Option<Self> {
        if v.iter().any(|x| !x.is_finite()) {
            return None;
        }
        let scale = max_abs(v);
        if scale == 0.0 {
            return None;
        }
        Some(Self {
            scale,
            unit_norm: unit_norm(v, scale),
        })
    }
}

fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |m: f64, x| m.max(x.abs()))
}

fn unit_norm(v: &[f64], scale: f64) -> f64 {
    v.iter()
        .map(|x| {
            let y = x / scale;
            y * y
        })
        .sum::<f64>()
        .sqrt()
}

#[inline]
pub(crate) fn dot_unchecked(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn check_vector(v: &[f64], operand: &'static str) -> Result<(), SimilarityError> {
    if v.is_empty() {
        return Err(SimilarityError::EmptyInput);
    }
    if let Some(index) = v.iter().position(|x| !x.is_finite()) {
        return Err(SimilarityError::NonFinite { operand, index });
    }
    Ok(())
}

pub(crate) fn check_pair(a: &[f64], b: &[f64]) -> Result<(), SimilarityError> {
    check_vector(a, "left")?;
    check_vector(b, "right")?;
    if a.len() != b.len() {
        return Err(SimilarityError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}
