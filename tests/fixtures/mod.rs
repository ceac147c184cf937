//! Shared setup for integration tests

#![allow(dead_code)]

use glicko2_period::{Glicko2Engine, PlayerId, RatingPeriod, Roster};

/// The four players of the worked example in Glickman's paper plus one who sits
/// the period out
pub struct GlickmanExample {
    pub engine: Glicko2Engine,
    pub roster: Roster,
    /// Ratings 1500/1400/1550/1700 with deviations 200/30/100/300
    pub players: [PlayerId; 4],
    /// Default rating, never plays
    pub idle: PlayerId,
}

pub fn glickman_example() -> GlickmanExample {
    let engine = Glicko2Engine::with_parameters(0.06, 0.5).unwrap();
    let mut roster = Roster::new();

    let players = [
        roster.add(engine.new_rating(Some(1500.0), Some(200.0), None)),
        roster.add(engine.new_rating(Some(1400.0), Some(30.0), None)),
        roster.add(engine.new_rating(Some(1550.0), Some(100.0), None)),
        roster.add(engine.new_rating(Some(1700.0), Some(300.0), None)),
    ];
    let idle = roster.add(engine.initial_rating());

    GlickmanExample {
        engine,
        roster,
        players,
        idle,
    }
}

/// Player 0 beats player 1, then loses to players 2 and 3
pub fn glickman_results(players: &[PlayerId; 4]) -> Vec<(PlayerId, PlayerId)> {
    vec![
        (players[0], players[1]),
        (players[2], players[0]),
        (players[3], players[0]),
    ]
}

pub fn period_from(results: &[(PlayerId, PlayerId)]) -> RatingPeriod {
    let mut period = RatingPeriod::new();
    for &(winner, loser) in results {
        period.add_result(winner, loser).unwrap();
    }
    period
}
