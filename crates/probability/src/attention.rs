//! Single-head dot-product attention over small dense matrices.
//!
//! Scores are `Q @ K^T`, weights are the row-wise softmax of the scores and
//! the output is `weights @ V`. Matrices are slices of rows.

use serde::Serialize;
use tracing::debug;

use crate::distribution::Distribution;
use crate::error::ProbabilityError;
use crate::softmax::softmax_with_temperature;

/// Intermediate and final values of one attention pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attention {
    pub scores: Vec<Vec<f64>>,
    pub weights: Vec<Distribution>,
    pub output: Vec<Vec<f64>>,
}

/// Attention with raw dot-product scores.
pub fn attention<R: AsRef<[f64]>>(
    query: &[R],
    key: &[R],
    value: &[R],
) -> Result<Attention, ProbabilityError> {
    attend(query, key, value, 1.0)
}

/// Attention with scores divided by `sqrt(d_k)`, as in transformer layers.
pub fn scaled_dot_product_attention<R: AsRef<[f64]>>(
    query: &[R],
    key: &[R],
    value: &[R],
) -> Result<Attention, ProbabilityError> {
    let d_k = width(key)?;
    attend(query, key, value, (d_k as f64).sqrt())
}

fn attend<R: AsRef<[f64]>>(
    query: &[R],
    key: &[R],
    value: &[R],
    temperature: f64,
) -> Result<Attention, ProbabilityError> {
    let d_q = width(query)?;
    let d_k = width(key)?;
    let d_v = width(value)?;
    if d_q != d_k {
        return Err(ProbabilityError::LengthMismatch {
            left: d_q,
            right: d_k,
        });
    }
    if key.len() != value.len() {
        return Err(ProbabilityError::LengthMismatch {
            left: key.len(),
            right: value.len(),
        });
    }

    debug!(
        queries = query.len(),
        keys = key.len(),
        d_k,
        d_v,
        temperature,
        "attention"
    );

    let scores: Vec<Vec<f64>> = query
        .iter()
        .map(|q| key.iter().map(|k| dot(q.as_ref(), k.as_ref())).collect())
        .collect();

    let weights = scores
        .iter()
        .map(|row| softmax_with_temperature(row, temperature))
        .collect::<Result<Vec<_>, _>>()?;

    let output = weights
        .iter()
        .map(|w| {
            let mut out = vec![0.0; d_v];
            for (&p, v) in w.iter().zip(value) {
                for (o, &x) in out.iter_mut().zip(v.as_ref()) {
                    *o += p * x;
                }
            }
            out
        })
        .collect();

    Ok(Attention {
        scores,
        weights,
        output,
    })
}

/// Common row width of a non-empty matrix.
fn width<R: AsRef<[f64]>>(rows: &[R]) -> Result<usize, ProbabilityError> {
    let first = rows.first().ok_or(ProbabilityError::EmptyInput)?.as_ref().len();
    if first == 0 {
        return Err(ProbabilityError::EmptyInput);
    }
    for row in rows {
        let len = row.as_ref().len();
        if len != first {
            return Err(ProbabilityError::LengthMismatch {
                left: first,
                right: len,
            });
        }
    }
    Ok(first)
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
