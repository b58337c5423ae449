pub mod engine;
pub mod precipitation;
pub mod temperature;

pub use engine::SuitabilityEngine;

use super::calculations::Observation;
use crate::models::{CropRecord, DimensionAssessment};

/// Trait for per-dimension tolerance checks
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Assess the observation against the crop's range, or `None` when the
    /// crop lacks the bounds this rule needs
    fn evaluate(&self, obs: &Observation, crop: &CropRecord) -> Option<DimensionAssessment>;
}
