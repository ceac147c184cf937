//! Glicko-2 rating engine
//!
//! This module provides scale conversion, match records, rating periods, the
//! competitor arena and the engine that turns a period of results into new
//! ratings.

pub mod engine;
pub mod match_record;
pub mod period;
pub mod roster;
pub mod scale;
pub mod volatility;

// Re-export commonly used types
pub use engine::{Glicko2Engine, PeriodStatistics};
pub use match_record::MatchRecord;
pub use period::RatingPeriod;
pub use roster::Roster;
pub use volatility::{VolatilityInputs, VolatilitySolution, VolatilitySolver};
