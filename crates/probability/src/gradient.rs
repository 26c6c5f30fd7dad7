//! Gradient descent on a one-dimensional function.
//!
//! Each step moves `x` against the gradient: `x -= learning_rate * f'(x)`.
//! A small rate creeps toward the minimum, a rate that is too large
//! overshoots it and the iterates grow without bound.
//!
//! ```rust
//! use probability::GradientDescent;
//!
//! // f(x) = x^2, f'(x) = 2x
//! let descent = GradientDescent::new(|x| x * x, |x| 2.0 * x, 5.0, 0.1).unwrap();
//! let last = descent.take(50).last().unwrap();
//! assert!(last.x.abs() < 1e-3);
//! ```

use std::iter::FusedIterator;

use serde::Serialize;
use tracing::debug;

use crate::error::ProbabilityError;

/// State after one update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Step {
    /// 1-based update count.
    pub step: usize,
    /// Position after the update.
    pub x: f64,
    /// `f(x)` at the new position.
    pub value: f64,
    /// Gradient used for this update, taken at the previous position.
    pub gradient: f64,
}

/// Lazy gradient descent over `f` with derivative `grad`.
///
/// Iteration ends early once `x` or `f(x)` stops being finite.
pub struct GradientDescent<F, G> {
    f: F,
    grad: G,
    x: f64,
    learning_rate: f64,
    step: usize,
    done: bool,
}

impl<F, G> GradientDescent<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    /// `learning_rate` must be finite and > 0, `start` must be finite.
    pub fn new(f: F, grad: G, start: f64, learning_rate: f64) -> Result<Self, ProbabilityError> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(ProbabilityError::InvalidLearningRate { learning_rate });
        }
        if !start.is_finite() {
            return Err(ProbabilityError::NonFiniteStart { start });
        }
        Ok(Self {
            f,
            grad,
            x: start,
            learning_rate,
            step: 0,
            done: false,
        })
    }

    /// Current position.
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Run until the gradient magnitude drops below `tolerance` or
    /// `max_steps` updates have been made.
    pub fn run(self, max_steps: usize, tolerance: f64) -> Descent {
        let mut steps = Vec::new();
        let mut converged = false;
        for step in self.take(max_steps) {
            steps.push(step);
            if step.gradient.abs() < tolerance {
                converged = true;
                break;
            }
        }
        debug!(steps = steps.len(), converged, "gradient_descent");
        Descent { steps, converged }
    }
}

impl<F, G> Iterator for GradientDescent<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }
        let gradient = (self.grad)(self.x);
        let x = self.x - self.learning_rate * gradient;
        let value = (self.f)(x);
        if !gradient.is_finite() || !x.is_finite() || !value.is_finite() {
            debug!(step = self.step, x, "gradient_descent_diverged");
            self.done = true;
            return None;
        }
        self.x = x;
        self.step += 1;
        Some(Step {
            step: self.step,
            x,
            value,
            gradient,
        })
    }
}

impl<F, G> FusedIterator for GradientDescent<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
}

/// Result of [`GradientDescent::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descent {
    pub steps: Vec<Step>,
    /// True when the gradient fell below the tolerance.
    pub converged: bool,
}

impl Descent {
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}
