//! Arena that owns every competitor's rating
//!
//! Ratings are allocated once and referred to by [`PlayerId`] everywhere else, so
//! match records and rating periods never hold copies of a rating.

use crate::error::{RatingError, Result};
use crate::types::{PlayerId, Rating, RatingChange, RatingUpdate};
use serde::{Deserialize, Serialize};

/// In-memory collection of ratings addressed by [`PlayerId`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    ratings: Vec<Rating>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a competitor and return its handle
    pub fn add(&mut self, rating: Rating) -> PlayerId {
        self.ratings.push(rating);
        PlayerId::from_index(self.ratings.len() - 1)
    }

    pub fn get(&self, player_id: PlayerId) -> Result<&Rating> {
        self.ratings
            .get(player_id.index())
            .ok_or_else(|| RatingError::PlayerNotFound { player_id }.into())
    }

    pub fn get_mut(&mut self, player_id: PlayerId) -> Result<&mut Rating> {
        self.ratings
            .get_mut(player_id.index())
            .ok_or_else(|| RatingError::PlayerNotFound { player_id }.into())
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        player_id.index() < self.ratings.len()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// All competitors in allocation order
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Rating)> {
        self.ratings
            .iter()
            .enumerate()
            .map(|(index, rating)| (PlayerId::from_index(index), rating))
    }

    /// Write a set of staged updates into the roster
    ///
    /// Every handle is checked before anything is written, so either all updates
    /// land or none do.
    pub fn apply(&mut self, updates: &[RatingUpdate]) -> Result<Vec<RatingChange>> {
        if let Some(missing) = updates.iter().find(|u| !self.contains(u.player_id)) {
            return Err(RatingError::PlayerNotFound {
                player_id: missing.player_id,
            }
            .into());
        }

        let mut changes = Vec::with_capacity(updates.len());
        for update in updates {
            let rating = &mut self.ratings[update.player_id.index()];
            let old_rating = rating.clone();

            rating.rating = update.rating;
            rating.deviation = update.deviation;
            rating.volatility = update.volatility;
            rating.record_matches(update.matches);

            changes.push(RatingChange {
                player_id: update.player_id,
                old_rating,
                new_rating: rating.clone(),
            });
        }

        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(player_id: PlayerId, rating: f64) -> RatingUpdate {
        RatingUpdate {
            player_id,
            rating,
            deviation: 100.0,
            volatility: 0.05,
            matches: 2,
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut roster = Roster::new();
        assert!(roster.is_empty());

        let a = roster.add(Rating::new(1500.0, 200.0, 0.06));
        let b = roster.add(Rating::new(1500.0, 200.0, 0.06));

        // Equal values, distinct identities
        assert_ne!(a, b);
        assert_eq!(roster.get(a).unwrap(), roster.get(b).unwrap());
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_unknown_player() {
        let roster = Roster::new();
        let err = roster.get(PlayerId::from_index(4)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::PlayerNotFound { .. })
        ));
    }

    #[test]
    fn test_apply_updates() {
        let mut roster = Roster::new();
        let a = roster.add(Rating::new(1500.0, 200.0, 0.06));

        let changes = roster.apply(&[update(a, 1520.0)]).unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old_rating.rating, 1500.0);
        assert_eq!(changes[0].new_rating.rating, 1520.0);
        assert!((changes[0].rating_delta() - 20.0).abs() < 1e-12);

        let rating = roster.get(a).unwrap();
        assert_eq!(rating.deviation, 100.0);
        assert_eq!(rating.volatility, 0.05);
        assert_eq!(rating.match_count(), 2);
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let mut roster = Roster::new();
        let a = roster.add(Rating::new(1500.0, 200.0, 0.06));
        let ghost = PlayerId::from_index(9);

        assert!(roster.apply(&[update(a, 1600.0), update(ghost, 1400.0)]).is_err());
        assert_eq!(roster.get(a).unwrap().rating, 1500.0);
        assert_eq!(roster.get(a).unwrap().match_count(), 0);
    }
}
