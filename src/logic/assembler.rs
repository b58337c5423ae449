use super::repository::CropRepository;
use super::rules::SuitabilityEngine;
use crate::error::Result;
use crate::models::{ErrorPayload, RecommendationPayload, ScoringMode, WeatherSnapshot};

/// Combines weather, crop record and suitability result into one payload.
///
/// Short-circuits on the first failure: a weather error skips the crop
/// lookup, an unknown crop skips scoring.
pub struct RecommendationAssembler<'a> {
    repository: &'a CropRepository,
    engine: &'a SuitabilityEngine,
    mode: ScoringMode,
}

impl<'a> RecommendationAssembler<'a> {
    pub fn new(repository: &'a CropRepository, engine: &'a SuitabilityEngine) -> Self {
        Self {
            repository,
            engine,
            mode: engine.mode(),
        }
    }

    /// Score in `mode` instead of the engine's configured mode
    pub fn with_mode(mut self, mode: ScoringMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn assemble(
        &self,
        city: &str,
        crop_query: &str,
        weather: Result<WeatherSnapshot>,
    ) -> std::result::Result<RecommendationPayload, ErrorPayload> {
        let snapshot = weather.map_err(|e| ErrorPayload::from_error(&e).with_city(city))?;

        let record = self
            .repository
            .resolve(crop_query)
            .ok_or_else(|| ErrorPayload::crop_not_found(crop_query).with_city(city))?;

        tracing::debug!(
            "Evaluating {} ({}) against {:?}°C, {:?}% humidity, {} mm rain, {} in {}",
            record.scientific_name,
            crop_query,
            snapshot.temperature_c,
            snapshot.humidity_pct,
            snapshot.precipitation_mm(),
            snapshot.primary_condition(),
            city
        );

        let result = self
            .engine
            .evaluate_in(self.mode, &snapshot, record)
            .map_err(|e| {
                ErrorPayload::from_error(&e)
                    .with_city(city)
                    .with_crop(crop_query)
            })?;

        Ok(RecommendationPayload {
            city: city.to_string(),
            crop: crop_query.to_string(),
            scientific_name: record.scientific_name.clone(),
            mode: self.mode,
            verdict: result.verdict,
            score: result.score,
            explanations: result.explanations,
            weather: snapshot,
            requirements: record.requirements(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::error::CropCheckError;
    use crate::models::{CropRecord, GradedScore, ScoringMode};

    fn repository() -> CropRepository {
        CropRepository::new(vec![
            CropRecord::new("abelmoschus esculentus", "okra")
                .with_temperature(15.0, 35.0)
                .with_rainfall(300.0, 2500.0)
                .with_optimal_rainfall(600.0, 1200.0),
            CropRecord::new("Mystery plant", "unknown"),
        ])
    }

    fn weather(temperature_c: f64) -> Result<WeatherSnapshot> {
        let mut snapshot = WeatherSnapshot::new("Kyiv");
        snapshot.temperature_c = Some(temperature_c);
        snapshot.humidity_pct = Some(70.0);
        Ok(snapshot)
    }

    #[test]
    fn builds_payload_for_known_crop() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let payload = RecommendationAssembler::new(&repo, &engine)
            .assemble("Kyiv", "okra", weather(22.0))
            .unwrap();

        assert_eq!(payload.city, "Kyiv");
        assert_eq!(payload.crop, "okra");
        assert_eq!(payload.scientific_name, "abelmoschus esculentus");
        assert!(payload.verdict);
        assert!(payload.explanations[0].contains("temperature suitable"));
        assert_eq!(payload.requirements.t_min, Some(15.0));
        assert_eq!(payload.requirements.r_max, Some(2500.0));
        assert_eq!(payload.weather.temperature_c, Some(22.0));
        assert!(payload.score.is_none());
    }

    #[test]
    fn weather_error_is_propagated_before_lookup() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let err = RecommendationAssembler::new(&repo, &engine)
            .assemble(
                "Atlantis",
                "no-such-crop",
                Err(CropCheckError::NotFound("City 'Atlantis' not found".into())),
            )
            .unwrap_err();

        assert_eq!(err.kind, "not_found");
        assert_eq!(err.error, "City 'Atlantis' not found");
        assert_eq!(err.city.as_deref(), Some("Atlantis"));
        // Crop lookup never ran, so the crop is not named
        assert!(err.crop.is_none());
    }

    #[test]
    fn upstream_failure_is_propagated() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let err = RecommendationAssembler::new(&repo, &engine)
            .assemble(
                "Kyiv",
                "okra",
                Err(CropCheckError::UpstreamUnavailable("timeout".into())),
            )
            .unwrap_err();
        assert_eq!(err.kind, "upstream_unavailable");
    }

    #[test]
    fn unknown_crop_names_query() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let err = RecommendationAssembler::new(&repo, &engine)
            .assemble("Kyiv", "dragonfruit", weather(22.0))
            .unwrap_err();

        assert_eq!(err.kind, "not_found");
        assert!(err.error.contains("dragonfruit"));
        assert_eq!(err.crop.as_deref(), Some("dragonfruit"));
        assert_eq!(err.city.as_deref(), Some("Kyiv"));
    }

    #[test]
    fn missing_reading_is_invalid_input() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let mut snapshot = WeatherSnapshot::new("Kyiv");
        snapshot.humidity_pct = Some(50.0);

        let err = RecommendationAssembler::new(&repo, &engine)
            .assemble("Kyiv", "okra", Ok(snapshot))
            .unwrap_err();
        assert_eq!(err.kind, "invalid_input");
    }

    #[test]
    fn graded_mode_includes_score() {
        let repo = repository();
        let engine = SuitabilityEngine::new(ScoringConfig {
            mode: ScoringMode::Graded,
            ..ScoringConfig::default()
        });
        let payload = RecommendationAssembler::new(&repo, &engine)
            .assemble("Kyiv", "okra", weather(22.0))
            .unwrap();

        assert_eq!(payload.mode, ScoringMode::Graded);
        assert_eq!(payload.score, Some(GradedScore::Index(1.0)));
    }

    #[test]
    fn requested_mode_overrides_engine_mode() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let payload = RecommendationAssembler::new(&repo, &engine)
            .with_mode(ScoringMode::Graded)
            .assemble("Kyiv", "okra", weather(12.0))
            .unwrap();

        assert_eq!(payload.mode, ScoringMode::Graded);
        // Temperature 3°C short -> 0.7, humidity 70% -> 700 inside -> 1.0
        assert_eq!(payload.score, Some(GradedScore::Index(0.85)));
        assert!(!payload.verdict);
    }

    #[test]
    fn crop_without_bounds_still_assembles() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let payload = RecommendationAssembler::new(&repo, &engine)
            .assemble("Kyiv", "mystery", weather(22.0))
            .unwrap();

        assert!(payload.explanations.is_empty());
        assert!(!payload.verdict);
        assert!(payload.requirements.t_min.is_none());
    }

    #[test]
    fn payload_field_names() {
        let repo = repository();
        let engine = SuitabilityEngine::default();
        let payload = RecommendationAssembler::new(&repo, &engine)
            .assemble("Kyiv", "okra", weather(5.0))
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["city"], "Kyiv");
        assert_eq!(json["crop"], "okra");
        assert_eq!(json["verdict"], false);
        assert_eq!(json["mode"], "boolean");
        assert!(json["explanations"][0].as_str().unwrap().contains("too cold"));
        assert_eq!(json["requirements"]["TMIN"], 15.0);
        assert_eq!(json["requirements"]["RMAX"], 2500.0);
        assert!(json.get("score").is_none());
        assert_eq!(json["weather"]["city"], "Kyiv");
    }
}
