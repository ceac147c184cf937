//! A single pairwise match result

use crate::error::{RatingError, Result};
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

pub const POINTS_FOR_WIN: f64 = 1.0;
pub const POINTS_FOR_LOSS: f64 = 0.0;
pub const POINTS_FOR_DRAW: f64 = 0.5;

/// Outcome of one match between two distinct competitors
///
/// For a draw the winner/loser slots only record who took part; both sides
/// score [`POINTS_FOR_DRAW`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    winner: PlayerId,
    loser: PlayerId,
    draw: bool,
}

impl MatchRecord {
    /// Record a match, rejecting a competitor paired with itself
    pub fn new(winner: PlayerId, loser: PlayerId, draw: bool) -> Result<Self> {
        if winner == loser {
            return Err(RatingError::InvalidInput {
                reason: format!("player {} cannot play against themselves", winner),
            }
            .into());
        }

        Ok(Self {
            winner,
            loser,
            draw,
        })
    }

    pub fn winner(&self) -> PlayerId {
        self.winner
    }

    pub fn loser(&self) -> PlayerId {
        self.loser
    }

    pub fn is_draw(&self) -> bool {
        self.draw
    }

    /// Whether the player took part in this match
    pub fn participated(&self, player: PlayerId) -> bool {
        self.winner == player || self.loser == player
    }

    /// Score for the player: 1 for a win, 0.5 for a draw, 0 for a loss
    pub fn score_for(&self, player: PlayerId) -> Result<f64> {
        if !self.participated(player) {
            return Err(RatingError::not_a_participant(player).into());
        }

        let score = if self.draw {
            POINTS_FOR_DRAW
        } else if self.winner == player {
            POINTS_FOR_WIN
        } else {
            POINTS_FOR_LOSS
        };

        Ok(score)
    }

    /// The competitor on the other side of the match
    pub fn opponent_for(&self, player: PlayerId) -> Result<PlayerId> {
        if self.winner == player {
            Ok(self.loser)
        } else if self.loser == player {
            Ok(self.winner)
        } else {
            Err(RatingError::not_a_participant(player).into())
        }
    }
}
