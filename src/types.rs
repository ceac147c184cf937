//! Common types used throughout the rating engine

use crate::rating::scale;
use serde::{Deserialize, Serialize};

/// Stable handle to a competitor held in a [`Roster`](crate::rating::Roster)
///
/// Competitors are compared by handle, never by value: two players that happen to
/// share rating, deviation and volatility are still different players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    /// Build a handle from a raw roster index
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw roster index behind this handle
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A competitor's Glicko-2 rating, stored on the display scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Skill estimate (default 1500)
    pub rating: f64,
    /// Rating deviation (RD), must stay positive
    pub deviation: f64,
    /// Expected fluctuation of skill between periods, must stay positive
    pub volatility: f64,
    #[serde(default)]
    match_count: u64,
}

impl Rating {
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            rating,
            deviation,
            volatility,
            match_count: 0,
        }
    }

    /// Rating on the internal Glicko-2 scale (μ)
    pub fn glicko2_rating(&self) -> f64 {
        scale::to_internal_rating(self.rating)
    }

    /// Set the rating from a value on the internal Glicko-2 scale
    pub fn set_glicko2_rating(&mut self, mu: f64) {
        self.rating = scale::to_display_rating(mu);
    }

    /// Deviation on the internal Glicko-2 scale (φ)
    pub fn glicko2_deviation(&self) -> f64 {
        scale::to_internal_deviation(self.deviation)
    }

    /// Set the deviation from a value on the internal Glicko-2 scale
    pub fn set_glicko2_deviation(&mut self, phi: f64) {
        self.deviation = scale::to_display_deviation(phi);
    }

    /// Number of match results this rating has absorbed so far
    pub fn match_count(&self) -> u64 {
        self.match_count
    }

    pub(crate) fn record_matches(&mut self, matches: u64) {
        self.match_count += matches;
    }
}

/// Values computed for one competitor during a rating period, not yet committed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub player_id: PlayerId,
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    /// Results that contributed to this update (0 for the passive branch)
    pub matches: u64,
}

/// Rating change information for a player after a committed period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub old_rating: Rating,
    pub new_rating: Rating,
}

impl RatingChange {
    /// Signed movement of the display rating
    pub fn rating_delta(&self) -> f64 {
        self.new_rating.rating - self.old_rating.rating
    }
}
