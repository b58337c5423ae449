use super::assembler::RecommendationAssembler;
use super::repository::CropRepository;
use super::rules::SuitabilityEngine;
use crate::datasources::WeatherGateway;
use crate::error::{CropCheckError, Result};
use crate::models::{
    CropRecord, ErrorPayload, RecommendationPayload, ScoringMode, WeatherSnapshot,
};
use std::sync::Arc;

/// Entry point for the outer surfaces (CLI and HTTP).
///
/// Holds the shared crop table, the engine and the weather gateway, and
/// exposes crop lookup and the end-to-end suitability check.
pub struct CropAdvisor<G> {
    repository: Arc<CropRepository>,
    engine: SuitabilityEngine,
    gateway: G,
}

impl<G: WeatherGateway> CropAdvisor<G> {
    pub fn new(repository: Arc<CropRepository>, engine: SuitabilityEngine, gateway: G) -> Self {
        Self {
            repository,
            engine,
            gateway,
        }
    }

    pub fn lookup_crop(&self, name: &str) -> Result<&CropRecord> {
        self.repository.resolve(name).ok_or_else(|| {
            CropCheckError::NotFound(format!("Crop '{}' not found", name.trim()))
        })
    }

    pub async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        let city = city.trim();
        if city.is_empty() {
            return Err(CropCheckError::InvalidInput("City must not be empty".into()));
        }
        self.gateway.fetch_weather(city).await
    }

    /// End-to-end check. `mode` overrides the engine's configured mode.
    pub async fn check_suitability(
        &self,
        city: &str,
        crop: &str,
        mode: Option<ScoringMode>,
    ) -> std::result::Result<RecommendationPayload, ErrorPayload> {
        let weather = self.current_weather(city).await;
        if let Err(ref e) = weather {
            tracing::warn!("Weather lookup for '{}' failed: {}", city, e);
        }

        let mut assembler = RecommendationAssembler::new(&self.repository, &self.engine);
        if let Some(mode) = mode {
            assembler = assembler.with_mode(mode);
        }
        let outcome = assembler.assemble(city, crop, weather);

        match &outcome {
            Ok(payload) => tracing::info!(
                "Checked {} in {}: {} (index {:?})",
                payload.scientific_name,
                city,
                if payload.verdict { "suitable" } else { "not suitable" },
                payload.score.and_then(|s| s.value())
            ),
            Err(err) => tracing::info!("Check of '{}' in '{}' failed: {}", crop, city, err),
        }

        outcome
    }
}
