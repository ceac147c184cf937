//! Property tests for the rating engine
//!
//! - The volatility solver terminates with a usable value over plausible inputs
//! - The order results are recorded in does not change the outcome

use glicko2_period::rating::{VolatilityInputs, VolatilitySolver};
use glicko2_period::{Glicko2Engine, PlayerId, RatingPeriod, Roster};
use proptest::prelude::*;

/// (rating, deviation, volatility) within realistic bounds
fn rating_triple() -> impl Strategy<Value = (f64, f64, f64)> {
    (800.0f64..2200.0, 30.0f64..500.0, 0.01f64..0.1)
}

/// Results between `players` competitors as (winner, loser, draw) index triples
fn results(players: usize) -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec(
        (0..players, 1..players, prop::bool::weighted(0.2)),
        1..24,
    )
    .prop_map(move |entries| {
        entries
            .into_iter()
            .map(|(winner, offset, draw)| (winner, (winner + offset) % players, draw))
            .collect()
    })
}

fn build_roster(engine: &Glicko2Engine, triples: &[(f64, f64, f64)]) -> (Roster, Vec<PlayerId>) {
    let mut roster = Roster::new();
    let ids = triples
        .iter()
        .map(|&(rating, deviation, volatility)| {
            roster.add(engine.new_rating(Some(rating), Some(deviation), Some(volatility)))
        })
        .collect();
    (roster, ids)
}

fn build_period(ids: &[PlayerId], entries: &[(usize, usize, bool)]) -> RatingPeriod {
    let mut period = RatingPeriod::new();
    for &id in ids {
        period.add_participant(id);
    }
    for &(winner, loser, draw) in entries {
        if draw {
            period.add_draw(ids[winner], ids[loser]).unwrap();
        } else {
            period.add_result(ids[winner], ids[loser]).unwrap();
        }
    }
    period
}

proptest! {
    #[test]
    fn volatility_solver_converges(
        player in rating_triple(),
        opponents in prop::collection::vec((rating_triple(), 0u8..3), 1..10),
        tau in 0.3f64..1.2,
    ) {
        let engine = Glicko2Engine::with_parameters(0.06, tau).unwrap();
        let mut triples = vec![player];
        triples.extend(opponents.iter().map(|(triple, _)| *triple));
        let (roster, ids) = build_roster(&engine, &triples);

        let mut period = RatingPeriod::new();
        for (index, (_, outcome)) in opponents.iter().enumerate() {
            let opponent = ids[index + 1];
            match outcome {
                0 => period.add_result(ids[0], opponent).unwrap(),
                1 => period.add_result(opponent, ids[0]).unwrap(),
                _ => period.add_draw(ids[0], opponent).unwrap(),
            }
        }

        let stats = engine
            .period_statistics(&roster, &period, ids[0])
            .unwrap()
            .unwrap();
        let current = roster.get(ids[0]).unwrap();
        let solver = VolatilitySolver::from_config(engine.config());
        let solution = solver
            .solve(&VolatilityInputs {
                sigma: current.volatility,
                phi: current.glicko2_deviation(),
                delta: stats.delta(),
                v: stats.v,
            })
            .unwrap();

        prop_assert!(solution.volatility.is_finite());
        prop_assert!(solution.volatility > 0.0);
        prop_assert!(solution.iterations < 1_000);

        let update = engine.compute_update(&roster, &period, ids[0]).unwrap();
        prop_assert!(update.deviation > 0.0);
        prop_assert!(update.rating.is_finite());
    }

    #[test]
    fn result_order_does_not_matter(
        triples in prop::collection::vec(rating_triple(), 6),
        (entries, shuffled) in results(6).prop_flat_map(|entries| {
            let shuffled = Just(entries.clone()).prop_shuffle();
            (Just(entries), shuffled)
        }),
    ) {
        let engine = Glicko2Engine::with_parameters(0.06, 0.5).unwrap();

        let (mut forward_roster, ids) = build_roster(&engine, &triples);
        let mut shuffled_roster = forward_roster.clone();
        let mut forward = build_period(&ids, &entries);
        let mut permuted = build_period(&ids, &shuffled);

        engine.update_ratings(&mut forward_roster, &mut forward).unwrap();
        engine.update_ratings(&mut shuffled_roster, &mut permuted).unwrap();

        for &id in &ids {
            let a = forward_roster.get(id).unwrap();
            let b = shuffled_roster.get(id).unwrap();
            prop_assert!((a.rating - b.rating).abs() < 1e-4);
            prop_assert!((a.deviation - b.deviation).abs() < 1e-4);
            prop_assert!((a.volatility - b.volatility).abs() < 1e-6);
            prop_assert_eq!(a.match_count(), b.match_count());
        }
    }

    #[test]
    fn idle_players_only_gain_deviation(triple in rating_triple(), periods in 1usize..5) {
        let engine = Glicko2Engine::default();
        let (mut roster, ids) = build_roster(&engine, &[triple]);
        let mut period = RatingPeriod::with_participants(ids.clone());

        let mut last_deviation = triple.1;
        for _ in 0..periods {
            engine.update_ratings(&mut roster, &mut period).unwrap();
            let rating = roster.get(ids[0]).unwrap();
            prop_assert_eq!(rating.rating, triple.0);
            prop_assert_eq!(rating.volatility, triple.2);
            prop_assert!(rating.deviation > last_deviation);
            last_deviation = rating.deviation;
        }
    }
}
