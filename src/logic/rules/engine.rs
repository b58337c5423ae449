use super::{precipitation::PrecipitationRule, temperature::TemperatureRule, Rule};
use crate::config::ScoringConfig;
use crate::error::{CropCheckError, Result};
use crate::logic::calculations::{suitability_index, Observation};
use crate::models::{CropRecord, ScoringMode, SuitabilityResult, WeatherSnapshot};

/// Scores one weather snapshot against one crop record.
///
/// Stateless apart from its configuration; safe to share across requests.
pub struct SuitabilityEngine {
    rules: Vec<Box<dyn Rule>>,
    mode: ScoringMode,
    decay: f64,
}

impl SuitabilityEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(TemperatureRule),
            Box::new(PrecipitationRule {
                gates_verdict: config.precipitation_gates_verdict,
            }),
        ];

        Self {
            rules,
            mode: config.mode,
            decay: config.decay,
        }
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Evaluate in the configured mode.
    pub fn evaluate(&self, snapshot: &WeatherSnapshot, crop: &CropRecord) -> Result<SuitabilityResult> {
        self.evaluate_in(self.mode, snapshot, crop)
    }

    /// Evaluate in an explicit mode.
    ///
    /// Both modes produce the verdict and explanations; graded mode also
    /// attaches the suitability index.
    pub fn evaluate_in(
        &self,
        mode: ScoringMode,
        snapshot: &WeatherSnapshot,
        crop: &CropRecord,
    ) -> Result<SuitabilityResult> {
        let obs = Self::observe(snapshot)?;
        let result = self.assess(&obs, crop);

        Ok(match mode {
            ScoringMode::Boolean => result,
            ScoringMode::Graded => result.with_score(suitability_index(&obs, crop, self.decay)),
        })
    }

    fn assess(&self, obs: &Observation, crop: &CropRecord) -> SuitabilityResult {
        let assessments = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(obs, crop))
            .collect();

        SuitabilityResult::from_assessments(assessments)
    }

    fn observe(snapshot: &WeatherSnapshot) -> Result<Observation> {
        let temperature_c = snapshot.temperature_c.ok_or_else(|| {
            CropCheckError::InvalidInput(format!(
                "Temperature missing from weather data for '{}'",
                snapshot.city
            ))
        })?;
        let humidity_pct = snapshot.humidity_pct.ok_or_else(|| {
            CropCheckError::InvalidInput(format!(
                "Humidity missing from weather data for '{}'",
                snapshot.city
            ))
        })?;

        Ok(Observation {
            temperature_c,
            humidity_pct,
            precipitation_mm: snapshot.precipitation_mm(),
        })
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for SuitabilityEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
