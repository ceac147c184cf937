//! glicko2-period - Glicko-2 rating periods for pairwise results
//!
//! This crate computes new (rating, deviation, volatility) triples for a set of
//! competitors after a rating period of wins, losses and draws, following
//! Glickman's "Example of the Glicko-2 system".

pub mod config;
pub mod error;
pub mod input;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::{AppConfig, RatingConfig};
pub use rating::{Glicko2Engine, MatchRecord, RatingPeriod, Roster};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
