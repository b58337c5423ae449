use super::Rule;
use crate::logic::calculations::Observation;
use crate::models::{CropRecord, Dimension, DimensionAssessment};

/// Absolute temperature tolerance rule
///
/// Compares the current air temperature with the crop's TMIN/TMAX survival
/// range. Always part of the verdict when both bounds are known.
pub struct TemperatureRule;

impl Rule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature"
    }

    fn name(&self) -> &'static str {
        "Temperature Tolerance"
    }

    fn evaluate(&self, obs: &Observation, crop: &CropRecord) -> Option<DimensionAssessment> {
        let (t_min, t_max) = crop.temperature_range()?;

        Some(DimensionAssessment::new(
            Dimension::Temperature,
            obs.temperature_c,
            t_min,
            t_max,
            true,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;

    fn obs(temperature_c: f64) -> Observation {
        Observation {
            temperature_c,
            humidity_pct: 50.0,
            precipitation_mm: 0.0,
        }
    }

    #[test]
    fn skipped_without_both_bounds() {
        let mut crop = CropRecord::new("x", "y");
        assert!(TemperatureRule.evaluate(&obs(20.0), &crop).is_none());

        crop.t_max = Some(30.0);
        assert!(TemperatureRule.evaluate(&obs(20.0), &crop).is_none());
    }

    #[test]
    fn classifies_against_range() {
        let crop = CropRecord::new("x", "y").with_temperature(15.0, 35.0);

        let cold = TemperatureRule.evaluate(&obs(5.0), &crop).unwrap();
        assert_eq!(cold.classification, Classification::TooLow);
        assert!(cold.gating);

        let hot = TemperatureRule.evaluate(&obs(36.0), &crop).unwrap();
        assert_eq!(hot.classification, Classification::TooHigh);

        let edge = TemperatureRule.evaluate(&obs(35.0), &crop).unwrap();
        assert_eq!(edge.classification, Classification::Suitable);
    }
}
