//! Volatility update (Step 5 of Glickman's paper)
//!
//! The new volatility is `exp(x / 2)` where `x` is the root of
//!
//! ```text
//! f(x) = e^x (Δ² - φ² - v - e^x) / (2 (φ² + v + e^x)²) - (x - a) / τ²,   a = ln(σ²)
//! ```
//!
//! `f` is located with the Illinois variant of regula falsi: secant steps inside a
//! bracket that always changes sign, halving the stale end's value whenever the
//! same end survives twice so convergence cannot stall on one side.

use crate::config::RatingConfig;
use crate::error::{RatingError, Result};

/// Quantities for one competitor that the volatility equation depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityInputs {
    /// Current volatility σ
    pub sigma: f64,
    /// Current deviation φ (internal scale)
    pub phi: f64,
    /// Estimated improvement Δ
    pub delta: f64,
    /// Estimated variance v of the rating from game outcomes
    pub v: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilitySolution {
    /// New volatility σ'
    pub volatility: f64,
    /// Steps taken to find the initial bracket
    pub bracket_steps: usize,
    /// Steps taken by the Illinois iteration
    pub iterations: usize,
}

/// Illinois root-finder for the volatility equation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilitySolver {
    tau: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl VolatilitySolver {
    pub fn new(tau: f64, tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tau,
            tolerance,
            max_iterations,
        }
    }

    pub fn from_config(config: &RatingConfig) -> Self {
        Self::new(
            config.tau,
            config.convergence_tolerance,
            config.max_iterations,
        )
    }

    pub fn solve(&self, inputs: &VolatilityInputs) -> Result<VolatilitySolution> {
        let a = (inputs.sigma * inputs.sigma).ln();
        if !a.is_finite() {
            return Err(divergence(format!(
                "volatility {} has no finite logarithm",
                inputs.sigma
            )));
        }

        let f = |x: f64| self.f(x, a, inputs);

        // Step 5.2: initial bracket [A, B]
        let phi_sq = inputs.phi * inputs.phi;
        let delta_sq = inputs.delta * inputs.delta;
        let mut x_a = a;
        let mut bracket_steps = 0;
        let mut x_b = if delta_sq > phi_sq + inputs.v {
            (delta_sq - phi_sq - inputs.v).ln()
        } else {
            let step = self.tau.abs();
            let mut k = 1;
            loop {
                let candidate = a - k as f64 * step;
                let value = f(candidate);
                bracket_steps = k;
                if value.is_nan() {
                    return Err(divergence(format!(
                        "f({}) is not a number while bracketing",
                        candidate
                    )));
                }
                if value >= 0.0 {
                    break candidate;
                }
                if k >= self.max_iterations {
                    return Err(divergence(format!(
                        "no bracket found within {} steps",
                        self.max_iterations
                    )));
                }
                k += 1;
            }
        };

        // Step 5.3
        let mut f_a = f(x_a);
        let mut f_b = f(x_b);

        // Step 5.4
        let mut iterations = 0;
        while (x_b - x_a).abs() > self.tolerance {
            if iterations >= self.max_iterations {
                return Err(divergence(format!(
                    "volatility did not converge within {} iterations",
                    self.max_iterations
                )));
            }
            iterations += 1;

            let c = x_a + (x_a - x_b) * f_a / (f_b - f_a);
            let f_c = f(c);
            if !c.is_finite() || !f_c.is_finite() {
                return Err(divergence(format!(
                    "non-finite iterate {} (f = {}) after {} iterations",
                    c, f_c, iterations
                )));
            }

            if f_c * f_b < 0.0 {
                x_a = x_b;
                f_a = f_b;
            } else {
                f_a /= 2.0;
            }

            x_b = c;
            f_b = f_c;
        }

        // Step 5.5
        let volatility = (x_a / 2.0).exp();
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(divergence(format!("solved volatility {} is unusable", volatility)));
        }

        Ok(VolatilitySolution {
            volatility,
            bracket_steps,
            iterations,
        })
    }

    fn f(&self, x: f64, a: f64, inputs: &VolatilityInputs) -> f64 {
        let ex = x.exp();
        let phi_sq = inputs.phi * inputs.phi;
        let denominator = phi_sq + inputs.v + ex;

        ex * (inputs.delta * inputs.delta - phi_sq - inputs.v - ex)
            / (2.0 * denominator * denominator)
            - (x - a) / (self.tau * self.tau)
    }
}

fn divergence(reason: String) -> anyhow::Error {
    RatingError::NumericDivergence { reason }.into()
}
