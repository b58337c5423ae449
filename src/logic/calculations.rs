use crate::models::{CropRecord, GradedScore};

/// Scale factor placing relative humidity (%) on the millimetre scale of the
/// optimal annual rainfall range. A rough normalisation, not a conversion.
pub const HUMIDITY_TO_RAINFALL_SCALE: f64 = 10.0;

/// Validated weather inputs for scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub precipitation_mm: f64,
}

/// Score one value against a tolerance range.
///
/// 1.0 inside `[min, max]` (inclusive), then linear decay of `1 / decay` per
/// unit outside the range, floored at 0.
pub fn range_score(value: f64, min: f64, max: f64, decay: f64) -> f64 {
    let distance = if value < min {
        min - value
    } else if value > max {
        value - max
    } else {
        return 1.0;
    };
    (1.0 - distance / decay).max(0.0)
}

/// Round to `places` decimals, ties to even (0.625 -> 0.62, 0.375 -> 0.38).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Graded suitability index for one crop.
///
/// Averages the temperature score with the humidity score against the
/// optimal rainfall range, rounded to two decimals. Without temperature
/// bounds the index is `NotApplicable`; without optimal rainfall bounds the
/// temperature score stands alone.
pub fn suitability_index(obs: &Observation, crop: &CropRecord, decay: f64) -> GradedScore {
    let Some((t_min, t_max)) = crop.temperature_range() else {
        return GradedScore::NotApplicable;
    };

    let t_score = range_score(obs.temperature_c, t_min, t_max, decay);

    let index = match crop.optimal_rainfall_range() {
        Some((rop_min, rop_max)) => {
            let h_score = range_score(
                obs.humidity_pct * HUMIDITY_TO_RAINFALL_SCALE,
                rop_min,
                rop_max,
                decay,
            );
            (t_score + h_score) / 2.0
        }
        None => t_score,
    };

    GradedScore::Index(round_to(index, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(temperature_c: f64, humidity_pct: f64) -> Observation {
        Observation {
            temperature_c,
            humidity_pct,
            precipitation_mm: 0.0,
        }
    }

    #[test]
    fn range_score_inside_is_one() {
        assert_eq!(range_score(15.0, 15.0, 35.0, 10.0), 1.0);
        assert_eq!(range_score(35.0, 15.0, 35.0, 10.0), 1.0);
        assert_eq!(range_score(22.0, 15.0, 35.0, 10.0), 1.0);
    }

    #[test]
    fn range_score_decays_linearly() {
        assert!((range_score(14.0, 15.0, 35.0, 10.0) - 0.9).abs() < 1e-9);
        assert!((range_score(10.0, 15.0, 35.0, 10.0) - 0.5).abs() < 1e-9);
        assert!((range_score(38.0, 15.0, 35.0, 10.0) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn range_score_floors_at_zero() {
        assert_eq!(range_score(5.0, 15.0, 35.0, 10.0), 0.0);
        assert_eq!(range_score(-40.0, 15.0, 35.0, 10.0), 0.0);
        assert_eq!(range_score(60.0, 15.0, 35.0, 10.0), 0.0);
    }

    #[test]
    fn range_score_is_monotonic_outside_range() {
        let mut previous = 1.0;
        for step in 0..30 {
            let score = range_score(35.0 + step as f64 * 0.5, 15.0, 35.0, 10.0);
            assert!(score <= previous);
            previous = score;
        }

        let mut previous = 1.0;
        for step in 0..30 {
            let score = range_score(15.0 - step as f64 * 0.5, 15.0, 35.0, 10.0);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn decay_constant_is_tunable() {
        assert!((range_score(10.0, 15.0, 35.0, 20.0) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(0.456, 2), 0.46);
        assert_eq!(round_to(0.454, 2), 0.45);
        assert_eq!(round_to(1.0, 2), 1.0);
    }

    #[test]
    fn round_to_breaks_ties_to_even() {
        assert_eq!(round_to(0.625, 2), 0.62);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(0.125, 2), 0.12);
    }

    #[test]
    fn index_exactly_between_hundredths_rounds_to_even() {
        let crop = CropRecord::new("abelmoschus esculentus", "okra")
            .with_temperature(15.0, 35.0)
            .with_optimal_rainfall(600.0, 1200.0);

        // 12.5°C -> 0.75, 59.5% -> 595 -> 0.5, mean exactly 0.625
        assert_eq!(
            suitability_index(&obs(12.5, 59.5), &crop, 10.0),
            GradedScore::Index(0.62)
        );
    }

    #[test]
    fn index_averages_temperature_and_humidity() {
        let crop = CropRecord::new("abelmoschus esculentus", "okra")
            .with_temperature(15.0, 35.0)
            .with_optimal_rainfall(600.0, 1200.0);

        // 22°C inside, 70% -> 700 inside
        assert_eq!(
            suitability_index(&obs(22.0, 70.0), &crop, 10.0),
            GradedScore::Index(1.0)
        );

        // 12°C -> 0.7, 55% -> 550 -> 1 - 50/10 floored to 0
        assert_eq!(
            suitability_index(&obs(12.0, 55.0), &crop, 10.0),
            GradedScore::Index(0.35)
        );

        // 22°C -> 1.0, 59.5% -> 595 -> 0.5
        assert_eq!(
            suitability_index(&obs(22.0, 59.5), &crop, 10.0),
            GradedScore::Index(0.75)
        );
    }

    #[test]
    fn index_without_temperature_bounds_is_not_applicable() {
        let crop = CropRecord::new("mystery", "").with_optimal_rainfall(600.0, 1200.0);
        let score = suitability_index(&obs(22.0, 70.0), &crop, 10.0);
        assert_eq!(score, GradedScore::NotApplicable);
        assert_ne!(score, GradedScore::Index(0.0));
    }

    #[test]
    fn index_without_optimal_rainfall_uses_temperature_only() {
        let crop = CropRecord::new("zea mays", "maize").with_temperature(10.0, 47.0);
        assert_eq!(
            suitability_index(&obs(8.0, 40.0), &crop, 10.0),
            GradedScore::Index(0.8)
        );
    }
}
