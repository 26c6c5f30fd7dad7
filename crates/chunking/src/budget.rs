//! Token, context-window and cost arithmetic.
//!
//! Token counts here are estimates from a fixed chars-per-token ratio
//! (about 4 for English). They are good enough to decide whether a prompt
//! fits a context window or what a call will roughly cost; exact counts need
//! the model's own tokenizer.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CHARS_PER_TOKEN;
use crate::error::ChunkError;
use crate::token::word_count;

/// Character, word and approximate token counts for a text.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TokenEstimate {
    pub chars: usize,
    pub words: usize,
    pub tokens: f64,
}

/// Approximate token count: `chars / chars_per_token`.
pub fn estimate_tokens(text: &str, chars_per_token: usize) -> Result<f64, ChunkError> {
    if chars_per_token == 0 {
        return Err(ChunkError::ZeroCharsPerToken);
    }
    Ok(text.chars().count() as f64 / chars_per_token as f64)
}

/// Characters, words and approximate tokens of `text`.
pub fn token_estimate(text: &str, chars_per_token: usize) -> Result<TokenEstimate, ChunkError> {
    Ok(TokenEstimate {
        chars: text.chars().count(),
        words: word_count(text),
        tokens: estimate_tokens(text, chars_per_token)?,
    })
}

/// A model's context window size in tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextWindow {
    pub name: String,
    pub tokens: usize,
}

impl ContextWindow {
    pub fn new(name: impl Into<String>, tokens: usize) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    /// Whether `tokens` fits strictly inside the window.
    pub fn fits(&self, tokens: f64) -> bool {
        tokens < self.tokens as f64
    }

    /// Tokens left after `tokens`; negative when the window overflows.
    pub fn remaining(&self, tokens: f64) -> f64 {
        self.tokens as f64 - tokens
    }
}

/// A few well-known context window sizes for the walkthrough output.
pub fn default_context_windows() -> Vec<ContextWindow> {
    vec![
        ContextWindow::new("GPT-3.5-turbo", 4_096),
        ContextWindow::new("GPT-4", 8_192),
        ContextWindow::new("GPT-4-turbo", 128_000),
        ContextWindow::new("Claude-3", 200_000),
    ]
}

/// Price per 1K tokens, in dollars.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Pricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_per_1k: 0.0015,
            output_per_1k: 0.002,
        }
    }
}

impl Pricing {
    pub fn validate(&self) -> Result<(), ChunkError> {
        for (name, value) in [
            ("input_per_1k", self.input_per_1k),
            ("output_per_1k", self.output_per_1k),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChunkError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative price (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Cost of a call with the given token counts.
    pub fn estimate_cost(&self, input_tokens: f64, output_tokens: f64) -> CostEstimate {
        CostEstimate {
            input_tokens,
            output_tokens,
            input_cost: input_tokens / 1000.0 * self.input_per_1k,
            output_cost: output_tokens / 1000.0 * self.output_per_1k,
        }
    }

    /// Cost of a call estimated from the prompt and response text.
    pub fn estimate_text_cost(
        &self,
        prompt: &str,
        response: &str,
        chars_per_token: usize,
    ) -> Result<CostEstimate, ChunkError> {
        Ok(self.estimate_cost(
            estimate_tokens(prompt, chars_per_token)?,
            estimate_tokens(response, chars_per_token)?,
        ))
    }
}

/// Result of [`Pricing::estimate_cost`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CostEstimate {
    pub input_tokens: f64,
    pub output_tokens: f64,
    pub input_cost: f64,
    pub output_cost: f64,
}

impl CostEstimate {
    pub fn total_tokens(&self) -> f64 {
        self.input_tokens + self.output_tokens
    }

    pub fn total_cost(&self) -> f64 {
        self.input_cost + self.output_cost
    }
}

/// Budget defaults used when no configuration is supplied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetConfig {
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,
    #[serde(default = "default_context_windows")]
    pub context_windows: Vec<ContextWindow>,
    #[serde(default)]
    pub pricing: Pricing,
}

fn default_chars_per_token() -> usize {
    DEFAULT_CHARS_PER_TOKEN
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            context_windows: default_context_windows(),
            pricing: Pricing::default(),
        }
    }
}

impl BudgetConfig {
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chars_per_token == 0 {
            return Err(ChunkError::ZeroCharsPerToken);
        }
        if let Some(window) = self.context_windows.iter().find(|w| w.tokens == 0) {
            return Err(ChunkError::InvalidConfig(format!(
                "context window {} must have at least one token",
                window.name
            )));
        }
        self.pricing.validate()
    }
}
