//! Results accumulated over one rating period

use crate::error::Result;
use crate::rating::match_record::MatchRecord;
use crate::types::PlayerId;
use std::collections::HashSet;

/// Match records for one rating period plus the competitors tracked by it
///
/// A competitor named in any result is tracked automatically. Competitors who
/// should have their deviation grow without playing are registered with
/// [`RatingPeriod::add_participant`]. Registrations outlive [`RatingPeriod::clear`].
#[derive(Debug, Clone, Default)]
pub struct RatingPeriod {
    results: Vec<MatchRecord>,
    participants: Vec<PlayerId>,
    tracked: HashSet<PlayerId>,
}

impl RatingPeriod {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a period with an initial set of participants
    pub fn with_participants(participants: impl IntoIterator<Item = PlayerId>) -> Self {
        let mut period = Self::new();
        for player in participants {
            period.add_participant(player);
        }
        period
    }

    /// Record a decisive result
    pub fn add_result(&mut self, winner: PlayerId, loser: PlayerId) -> Result<()> {
        self.push(MatchRecord::new(winner, loser, false)?);
        Ok(())
    }

    /// Record a draw; both players score half a point
    pub fn add_draw(&mut self, player1: PlayerId, player2: PlayerId) -> Result<()> {
        self.push(MatchRecord::new(player1, player2, true)?);
        Ok(())
    }

    /// Track a competitor even if they play no match this period
    pub fn add_participant(&mut self, player: PlayerId) {
        if self.tracked.insert(player) {
            self.participants.push(player);
        }
    }

    /// Results the player took part in, in insertion order
    ///
    /// The iterator is lazy and can be cloned to walk the results again.
    pub fn results_for(
        &self,
        player: PlayerId,
    ) -> impl Iterator<Item = &MatchRecord> + Clone + '_ {
        self.results
            .iter()
            .filter(move |record| record.participated(player))
    }

    /// Every tracked competitor, each listed once, in first-seen order
    pub fn participants(&self) -> &[PlayerId] {
        &self.participants
    }

    pub fn results(&self) -> &[MatchRecord] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Drop all results; participant registrations are kept
    pub fn clear(&mut self) {
        self.results.clear();
    }

    fn push(&mut self, record: MatchRecord) {
        self.add_participant(record.winner());
        self.add_participant(record.loser());
        self.results.push(record);
    }
}
