//! Temperature configuration.
//!
//! Temperature divides logits before softmax. Values near 0 make the
//! output close to deterministic, values around 1 leave the model's
//! distribution untouched and values toward 2 add a lot of randomness.

use serde::{Deserialize, Serialize};

use crate::error::ProbabilityError;
use crate::softmax::validate_temperature;

/// Temperature applied by callers that turn scores into probabilities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SamplingConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_temperature() -> f64 {
    1.0
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
        }
    }
}

impl SamplingConfig {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn validate(&self) -> Result<(), ProbabilityError> {
        validate_temperature(self.temperature)
    }

    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::for_temperature(self.temperature)
    }
}

/// Rule-of-thumb temperature ranges for LLM sampling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    /// 0.0 - 0.3
    Deterministic,
    /// 0.4 - 0.7
    Balanced,
    /// 0.8 - 1.2
    Creative,
    /// 1.3 - 2.0 and above
    Experimental,
}

impl TemperatureBand {
    pub const ALL: [TemperatureBand; 4] = [
        TemperatureBand::Deterministic,
        TemperatureBand::Balanced,
        TemperatureBand::Creative,
        TemperatureBand::Experimental,
    ];

    pub fn for_temperature(temperature: f64) -> Self {
        if temperature < 0.35 {
            TemperatureBand::Deterministic
        } else if temperature < 0.75 {
            TemperatureBand::Balanced
        } else if temperature < 1.25 {
            TemperatureBand::Creative
        } else {
            TemperatureBand::Experimental
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            TemperatureBand::Deterministic => "0.0 - 0.3",
            TemperatureBand::Balanced => "0.4 - 0.7",
            TemperatureBand::Creative => "0.8 - 1.2",
            TemperatureBand::Experimental => "1.3 - 2.0",
        }
    }

    pub fn use_case(&self) -> &'static str {
        match self {
            TemperatureBand::Deterministic => {
                "deterministic, factual tasks (classification, extraction)"
            }
            TemperatureBand::Balanced => "creative but controlled (general Q&A, writing)",
            TemperatureBand::Creative => "creative tasks (storytelling, brainstorming)",
            TemperatureBand::Experimental => "very creative, high randomness (experimental)",
        }
    }
}
