use super::Rule;
use crate::logic::calculations::Observation;
use crate::models::{CropRecord, Dimension, DimensionAssessment};

/// Rainfall tolerance rule
///
/// Compares the last hour of rain with the crop's RMIN/RMAX range. The range
/// is annual, so a one-hour reading is a weak signal; the rule reports it but
/// stays out of the verdict unless configured otherwise.
pub struct PrecipitationRule {
    pub gates_verdict: bool,
}

impl Rule for PrecipitationRule {
    fn id(&self) -> &'static str {
        "precipitation"
    }

    fn name(&self) -> &'static str {
        "Rainfall Tolerance"
    }

    fn evaluate(&self, obs: &Observation, crop: &CropRecord) -> Option<DimensionAssessment> {
        let (r_min, r_max) = crop.rainfall_range()?;

        Some(DimensionAssessment::new(
            Dimension::Precipitation,
            obs.precipitation_mm,
            r_min,
            r_max,
            self.gates_verdict,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Classification;

    fn obs(precipitation_mm: f64) -> Observation {
        Observation {
            temperature_c: 20.0,
            humidity_pct: 50.0,
            precipitation_mm,
        }
    }

    #[test]
    fn informational_by_default_configuration() {
        let rule = PrecipitationRule {
            gates_verdict: false,
        };
        let crop = CropRecord::new("x", "y").with_rainfall(300.0, 2500.0);
        let assessment = rule.evaluate(&obs(0.0), &crop).unwrap();
        assert_eq!(assessment.classification, Classification::TooLow);
        assert!(!assessment.gating);
    }

    #[test]
    fn skipped_without_rainfall_bounds() {
        let rule = PrecipitationRule {
            gates_verdict: true,
        };
        let crop = CropRecord::new("x", "y").with_temperature(10.0, 30.0);
        assert!(rule.evaluate(&obs(1.0), &crop).is_none());
    }
}
