//! Glicko-2 rating engine
//!
//! Implements Steps 3-8 of Glickman's "Example of the Glicko-2 system" for a
//! whole rating period at once. Updating is split in two phases: every
//! participant's new state is computed against the committed roster, then all of
//! them are written back together. No competitor ever sees another one's
//! half-finished update, so the order results were recorded in does not matter.

use crate::config::RatingConfig;
use crate::error::{RatingError, Result};
use crate::rating::period::RatingPeriod;
use crate::rating::roster::Roster;
use crate::rating::scale;
use crate::rating::volatility::{VolatilityInputs, VolatilitySolver};
use crate::types::{PlayerId, Rating, RatingChange, RatingUpdate};
use std::f64::consts::PI;
use tracing::{debug, info, warn};

/// Step 3: weighting that shrinks an opponent's influence as their deviation grows
pub fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Step 3: expected score of a player rated `mu` against an opponent (`mu_j`, `phi_j`)
pub fn expected_score(mu: f64, mu_j: f64, phi_j: f64) -> f64 {
    1.0 / (1.0 + (-g(phi_j) * (mu - mu_j)).exp())
}

/// Step 6: deviation grown by one period's worth of volatility
pub fn pre_period_deviation(phi: f64, sigma: f64) -> f64 {
    (phi * phi + sigma * sigma).sqrt()
}

/// Sums over one player's results in a period (Steps 3 and 4)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodStatistics {
    /// Estimated variance of the rating from game outcomes
    pub v: f64,
    /// Σ g(φⱼ)(sⱼ - E), shared by Δ and the new rating
    pub outcome_sum: f64,
    pub matches: u64,
}

impl PeriodStatistics {
    /// Step 4: estimated improvement Δ
    pub fn delta(&self) -> f64 {
        self.v * self.outcome_sum
    }
}

/// Glicko-2 calculator for rating periods of pairwise results
#[derive(Debug, Clone)]
pub struct Glicko2Engine {
    config: RatingConfig,
    solver: VolatilitySolver,
}

impl Default for Glicko2Engine {
    fn default() -> Self {
        let config = RatingConfig::default();
        Self {
            solver: VolatilitySolver::from_config(&config),
            config,
        }
    }
}

impl Glicko2Engine {
    /// Create a new engine, rejecting invalid parameters
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            solver: VolatilitySolver::from_config(&config),
            config,
        })
    }

    /// Engine with default parameters apart from initial volatility and tau
    pub fn with_parameters(initial_volatility: f64, tau: f64) -> Result<Self> {
        Self::new(RatingConfig::with_parameters(initial_volatility, tau))
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn default_rating(&self) -> f64 {
        self.config.default_rating
    }

    pub fn default_deviation(&self) -> f64 {
        self.config.default_deviation
    }

    pub fn default_volatility(&self) -> f64 {
        self.config.default_volatility
    }

    pub fn tau(&self) -> f64 {
        self.config.tau
    }

    /// Rating for a new competitor; any value left out takes the engine default
    pub fn new_rating(
        &self,
        rating: Option<f64>,
        deviation: Option<f64>,
        volatility: Option<f64>,
    ) -> Rating {
        Rating::new(
            rating.unwrap_or(self.config.default_rating),
            deviation.unwrap_or(self.config.default_deviation),
            volatility.unwrap_or(self.config.default_volatility),
        )
    }

    /// Rating for a new competitor using only engine defaults
    pub fn initial_rating(&self) -> Rating {
        self.new_rating(None, None, None)
    }

    /// Probability-like expectation that `player` beats `opponent`
    pub fn expected_score_between(
        &self,
        roster: &Roster,
        player: PlayerId,
        opponent: PlayerId,
    ) -> Result<f64> {
        let player = roster.get(player)?;
        let opponent = roster.get(opponent)?;

        Ok(expected_score(
            player.glicko2_rating(),
            opponent.glicko2_rating(),
            opponent.glicko2_deviation(),
        ))
    }

    /// Accumulate v and the outcome sum over the player's results in one pass
    ///
    /// Returns `None` when the player has no results this period.
    pub fn period_statistics(
        &self,
        roster: &Roster,
        period: &RatingPeriod,
        player: PlayerId,
    ) -> Result<Option<PeriodStatistics>> {
        let mu = roster.get(player)?.glicko2_rating();

        let mut information = 0.0;
        let mut outcome_sum = 0.0;
        let mut matches = 0;

        for record in period.results_for(player) {
            let opponent = roster.get(record.opponent_for(player)?)?;
            let mu_j = opponent.glicko2_rating();
            let phi_j = opponent.glicko2_deviation();

            let g_j = g(phi_j);
            let e = expected_score(mu, mu_j, phi_j);

            information += g_j * g_j * e * (1.0 - e);
            outcome_sum += g_j * (record.score_for(player)? - e);
            matches += 1;
        }

        if matches == 0 {
            return Ok(None);
        }

        if !(information.is_finite() && information > 0.0) {
            return Err(RatingError::NumericDivergence {
                reason: format!(
                    "variance undefined for player {}: information sum is {}",
                    player, information
                ),
            }
            .into());
        }

        Ok(Some(PeriodStatistics {
            v: 1.0 / information,
            outcome_sum,
            matches,
        }))
    }

    /// New state of one participant, computed from committed values only
    pub fn compute_update(
        &self,
        roster: &Roster,
        period: &RatingPeriod,
        player: PlayerId,
    ) -> Result<RatingUpdate> {
        let current = roster.get(player)?;
        let phi = current.glicko2_deviation();
        let sigma = current.volatility;

        let update = match self.period_statistics(roster, period, player)? {
            Some(stats) => {
                let mu = current.glicko2_rating();
                let solution = self.solver.solve(&VolatilityInputs {
                    sigma,
                    phi,
                    delta: stats.delta(),
                    v: stats.v,
                })?;
                let new_sigma = solution.volatility;

                let phi_star = pre_period_deviation(phi, new_sigma);
                let new_phi = 1.0 / (1.0 / (phi_star * phi_star) + 1.0 / stats.v).sqrt();
                let new_mu = mu + new_phi * new_phi * stats.outcome_sum;

                debug!(
                    "Player {}: {} results, v={:.6}, delta={:.6}, volatility solved in {} steps",
                    player,
                    stats.matches,
                    stats.v,
                    stats.delta(),
                    solution.bracket_steps + solution.iterations
                );

                RatingUpdate {
                    player_id: player,
                    rating: scale::to_display_rating(new_mu),
                    deviation: scale::to_display_deviation(new_phi),
                    volatility: new_sigma,
                    matches: stats.matches,
                }
            }
            None => {
                // Did not compete: only Step 6 applies
                debug!("Player {} idle this period, inflating deviation", player);

                RatingUpdate {
                    player_id: player,
                    rating: current.rating,
                    deviation: scale::to_display_deviation(pre_period_deviation(phi, sigma)),
                    volatility: sigma,
                    matches: 0,
                }
            }
        };

        check_update(&update)?;
        Ok(update)
    }

    /// Compute phase for every participant of the period
    pub fn compute_updates(
        &self,
        roster: &Roster,
        period: &RatingPeriod,
    ) -> Result<Vec<RatingUpdate>> {
        period
            .participants()
            .iter()
            .map(|&player| self.compute_update(roster, period, player))
            .collect()
    }

    /// Run a rating period: compute every participant, commit, then clear results
    ///
    /// If any participant fails to compute, the roster and the period are left
    /// untouched.
    pub fn update_ratings(
        &self,
        roster: &mut Roster,
        period: &mut RatingPeriod,
    ) -> Result<Vec<RatingChange>> {
        let updates = match self.compute_updates(roster, period) {
            Ok(updates) => updates,
            Err(e) => {
                warn!("Rating period not committed: {}", e);
                return Err(e);
            }
        };

        let changes = roster.apply(&updates)?;

        info!(
            "Rating period committed: {} participants, {} results",
            changes.len(),
            period.len()
        );

        period.clear();
        Ok(changes)
    }
}

fn check_update(update: &RatingUpdate) -> Result<()> {
    let usable = update.rating.is_finite()
        && update.deviation.is_finite()
        && update.deviation > 0.0
        && update.volatility.is_finite()
        && update.volatility > 0.0;

    if !usable {
        return Err(RatingError::NumericDivergence {
            reason: format!(
                "player {} produced rating {}, deviation {}, volatility {}",
                update.player_id, update.rating, update.deviation, update.volatility
            ),
        }
        .into());
    }

    Ok(())
}
