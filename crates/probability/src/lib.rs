//! Probability helpers: softmax, temperature, entropy and cross-entropy.
//!
//! Everything here is a pure function over `f64` slices. Invalid input
//! (empty vectors, non-finite values, non-positive temperatures) is reported
//! through [`ProbabilityError`]; nothing panics or returns NaN silently.
//!
//! ## What we do
//!
//! - Numerically stable softmax with temperature scaling
//! - A validated [`Distribution`] type returned by softmax
//! - Shannon entropy and clipped cross-entropy
//! - Row-wise softmax and small dense attention for walkthroughs
//! - One-dimensional gradient descent, as a lazy iterator of steps
//!
//! ```rust
//! use probability::{cross_entropy, entropy, softmax};
//!
//! let probs = softmax(&[2.0, 1.0, 0.1]).unwrap();
//! assert_eq!(probs.argmax(), 0);
//!
//! let h = entropy(probs.as_slice()).unwrap();
//! assert!(h > 0.0 && h < 3f64.ln());
//!
//! let loss = cross_entropy(&[1.0, 0.0, 0.0], probs.as_slice()).unwrap();
//! assert!((loss - (-probs.as_slice()[0].ln())).abs() < 1e-12);
//! ```

mod attention;
mod config;
mod distribution;
mod entropy;
mod error;
mod gradient;
mod softmax;

pub use crate::attention::{attention, scaled_dot_product_attention, Attention};
pub use crate::config::{SamplingConfig, TemperatureBand};
pub use crate::distribution::{Distribution, SUM_TOLERANCE};
pub use crate::entropy::{cross_entropy, entropy, PROBABILITY_FLOOR};
pub use crate::error::ProbabilityError;
pub use crate::gradient::{Descent, GradientDescent, Step};
pub use crate::softmax::{softmax, softmax_rows, softmax_with_temperature, temperature_sweep};
