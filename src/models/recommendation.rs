use super::crop::CropRequirements;
use super::suitability::{GradedScore, ScoringMode};
use super::weather::WeatherSnapshot;
use crate::error::CropCheckError;
use serde::{Deserialize, Serialize};

/// Answer to "can this crop grow in this city right now?"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationPayload {
    pub city: String,
    pub crop: String,
    pub scientific_name: String,
    pub mode: ScoringMode,
    pub verdict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<GradedScore>,
    pub explanations: Vec<String>,
    pub weather: WeatherSnapshot,
    pub requirements: CropRequirements,
}

/// Structured failure handed back to callers instead of an error crossing
/// the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
}

impl ErrorPayload {
    pub fn new(kind: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind: kind.into(),
            city: None,
            crop: None,
        }
    }

    pub fn crop_not_found(crop: &str) -> Self {
        Self::new("not_found", format!("Crop '{}' not found in EcoCrop database", crop))
            .with_crop(crop)
    }

    pub fn from_error(err: &CropCheckError) -> Self {
        let message = match err {
            CropCheckError::NotFound(msg)
            | CropCheckError::InvalidInput(msg)
            | CropCheckError::UpstreamUnavailable(msg) => msg.clone(),
            other => other.to_string(),
        };
        Self::new(err.kind(), message)
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = Some(crop.into());
        self
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_not_found_names_the_query() {
        let payload = ErrorPayload::crop_not_found("dragonfruit");
        assert!(payload.error.contains("dragonfruit"));
        assert_eq!(payload.crop.as_deref(), Some("dragonfruit"));
        assert!(payload.city.is_none());
        assert_eq!(payload.kind, "not_found");
    }

    #[test]
    fn from_error_keeps_upstream_message() {
        let err = CropCheckError::UpstreamUnavailable("OpenWeatherMap returned 500".into());
        let payload = ErrorPayload::from_error(&err).with_city("Kyiv");
        assert_eq!(payload.kind, "upstream_unavailable");
        assert_eq!(payload.error, "OpenWeatherMap returned 500");
        assert_eq!(payload.city.as_deref(), Some("Kyiv"));
    }

    #[test]
    fn error_payload_omits_missing_identifiers() {
        let payload = ErrorPayload::new("invalid_input", "temperature missing");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["error"], "temperature missing");
        assert!(json.get("city").is_none());
        assert!(json.get("crop").is_none());
    }
}
