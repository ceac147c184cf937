//! Rating engine configuration

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RATING: f64 = 1500.0;
pub const DEFAULT_DEVIATION: f64 = 350.0;
pub const DEFAULT_VOLATILITY: f64 = 0.06;
pub const DEFAULT_TAU: f64 = 0.75;
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 0.000_001;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Parameters of a Glicko-2 engine, including the values used to seed new ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating given to new competitors (display scale)
    pub default_rating: f64,
    /// Deviation given to new competitors (display scale)
    pub default_deviation: f64,
    /// Volatility given to new competitors
    pub default_volatility: f64,
    /// System constant constraining volatility change over time
    pub tau: f64,
    /// Width at which the volatility root-finder stops
    pub convergence_tolerance: f64,
    /// Upper bound on root-finder steps before giving up
    pub max_iterations: usize,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            default_deviation: DEFAULT_DEVIATION,
            default_volatility: DEFAULT_VOLATILITY,
            tau: DEFAULT_TAU,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RatingConfig {
    /// Defaults with a custom initial volatility and tau
    pub fn with_parameters(initial_volatility: f64, tau: f64) -> Self {
        Self {
            default_volatility: initial_volatility,
            tau,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.default_rating.is_finite() {
            return Err(config_error("Default rating must be finite"));
        }

        if !is_positive(self.default_deviation) {
            return Err(config_error("Default deviation must be positive"));
        }

        if !is_positive(self.default_volatility) {
            return Err(config_error("Default volatility must be positive"));
        }

        if !is_positive(self.tau) {
            return Err(config_error("Tau must be positive"));
        }

        if !is_positive(self.convergence_tolerance) {
            return Err(config_error("Convergence tolerance must be positive"));
        }

        if self.max_iterations == 0 {
            return Err(config_error("Max iterations must be greater than 0"));
        }

        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn config_error(message: &str) -> anyhow::Error {
    RatingError::ConfigurationError {
        message: message.to_string(),
    }
    .into()
}
