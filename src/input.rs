//! Rating period files
//!
//! A period file names its players, optionally with their current rating,
//! deviation and volatility, then lists the results between them. Players that
//! should decay without playing are listed under `participants`.
//!
//! ```json
//! {
//!   "players": [{ "name": "alice", "rating": 1500, "deviation": 200 }, { "name": "bob" }],
//!   "results": [{ "winner": "alice", "loser": "bob" }],
//!   "participants": []
//! }
//! ```

use crate::error::{RatingError, Result};
use crate::rating::{Glicko2Engine, RatingPeriod, Roster};
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodInput {
    #[serde(default)]
    pub players: Vec<PlayerInput>,
    #[serde(default)]
    pub results: Vec<ResultInput>,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// A player entry; missing values fall back to the engine defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerInput {
    pub name: String,
    pub rating: Option<f64>,
    pub deviation: Option<f64>,
    pub volatility: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultInput {
    pub winner: String,
    pub loser: String,
    #[serde(default)]
    pub draw: bool,
}

/// A player's standing after the period, as written by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOutput {
    pub name: String,
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    pub matches: u64,
}

/// A period file resolved against an engine: roster, period and player names
#[derive(Debug, Clone)]
pub struct LoadedPeriod {
    pub roster: Roster,
    pub period: RatingPeriod,
    names: Vec<String>,
}

impl PeriodInput {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| {
            RatingError::InvalidInput {
                reason: format!("Invalid period file: {}", e),
            }
            .into()
        })
    }

    /// Create the roster and record every result and participant
    pub fn load(&self, engine: &Glicko2Engine) -> Result<LoadedPeriod> {
        let mut roster = Roster::new();
        let mut ids: HashMap<&str, PlayerId> = HashMap::new();
        let mut names = Vec::with_capacity(self.players.len());

        for player in &self.players {
            if ids.contains_key(player.name.as_str()) {
                return Err(invalid(format!("duplicate player name '{}'", player.name)));
            }

            let rating = engine.new_rating(player.rating, player.deviation, player.volatility);
            let usable = rating.rating.is_finite()
                && rating.deviation.is_finite()
                && rating.deviation > 0.0
                && rating.volatility.is_finite()
                && rating.volatility > 0.0;
            if !usable {
                return Err(invalid(format!(
                    "player '{}' needs a finite rating and positive deviation and volatility",
                    player.name
                )));
            }

            ids.insert(player.name.as_str(), roster.add(rating));
            names.push(player.name.clone());
        }

        let lookup = |name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| invalid(format!("unknown player '{}'", name)))
        };

        let mut period = RatingPeriod::new();
        for participant in &self.participants {
            period.add_participant(lookup(participant)?);
        }
        for result in &self.results {
            let winner = lookup(&result.winner)?;
            let loser = lookup(&result.loser)?;
            if result.draw {
                period.add_draw(winner, loser)?;
            } else {
                period.add_result(winner, loser)?;
            }
        }

        Ok(LoadedPeriod {
            roster,
            period,
            names,
        })
    }
}

impl LoadedPeriod {
    /// Run the period and report every player in file order
    pub fn run(&mut self, engine: &Glicko2Engine) -> Result<Vec<PlayerOutput>> {
        engine.update_ratings(&mut self.roster, &mut self.period)?;
        Ok(self.standings())
    }

    pub fn standings(&self) -> Vec<PlayerOutput> {
        self.roster
            .iter()
            .map(|(id, rating)| PlayerOutput {
                name: self.names[id.index()].clone(),
                rating: rating.rating,
                deviation: rating.deviation,
                volatility: rating.volatility,
                matches: rating.match_count(),
            })
            .collect()
    }
}

fn invalid(reason: String) -> anyhow::Error {
    RatingError::InvalidInput { reason }.into()
}
