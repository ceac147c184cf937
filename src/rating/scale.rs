//! Conversion between the display scale and the internal Glicko-2 scale
//!
//! Ratings are presented centred on 1500 so they read like Elo numbers; every
//! formula in the engine works on the internal scale, centred on 0.

/// Display rating that maps to 0 on the internal scale
pub const CENTER: f64 = 1500.0;

/// Ratio between display and internal units (Glickman, Step 2 and Step 8)
pub const MULTIPLIER: f64 = 173.7178;

/// Display rating -> μ
pub fn to_internal_rating(rating: f64) -> f64 {
    (rating - CENTER) / MULTIPLIER
}

/// μ -> display rating
pub fn to_display_rating(mu: f64) -> f64 {
    mu * MULTIPLIER + CENTER
}

/// Display deviation -> φ
pub fn to_internal_deviation(deviation: f64) -> f64 {
    deviation / MULTIPLIER
}

/// φ -> display deviation
pub fn to_display_deviation(phi: f64) -> f64 {
    phi * MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(to_internal_rating(1500.0), 0.0);
        assert!((to_internal_deviation(200.0) - 1.1513).abs() < 1e-4);
        assert!((to_internal_rating(1400.0) + 0.5756).abs() < 1e-4);
        assert!((to_internal_rating(1700.0) - 1.1513).abs() < 1e-4);
    }

    #[test]
    fn test_center_is_fixed_point() {
        assert_eq!(to_display_rating(0.0), CENTER);
        assert_eq!(to_display_deviation(1.0), MULTIPLIER);
    }

    proptest! {
        #[test]
        fn rating_round_trip(r in -10_000.0f64..10_000.0) {
            let back = to_display_rating(to_internal_rating(r));
            prop_assert!((back - r).abs() < 1e-9);
        }

        #[test]
        fn deviation_round_trip(d in 0.0f64..5_000.0) {
            let back = to_display_deviation(to_internal_deviation(d));
            prop_assert!((back - d).abs() < 1e-9);
        }
    }
}
