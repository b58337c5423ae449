use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Range check per dimension with explanations
    #[default]
    Boolean,
    /// Range check plus a linear-decay index in [0, 1]
    Graded,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Boolean => "boolean",
            ScoringMode::Graded => "graded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "boolean" | "bool" => Some(ScoringMode::Boolean),
            "graded" | "index" => Some(ScoringMode::Graded),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Temperature,
    Precipitation,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Temperature => "temperature",
            Dimension::Precipitation => "precipitation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Dimension::Temperature => "°C",
            Dimension::Precipitation => " mm",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    TooLow,
    TooHigh,
    Suitable,
}

impl Classification {
    /// Three-way comparison against an inclusive range.
    pub fn of(value: f64, min: f64, max: f64) -> Self {
        if value < min {
            Classification::TooLow
        } else if value > max {
            Classification::TooHigh
        } else {
            Classification::Suitable
        }
    }

    pub fn is_suitable(&self) -> bool {
        matches!(self, Classification::Suitable)
    }

    /// Wording for this classification in the given dimension.
    pub fn label(&self, dimension: Dimension) -> &'static str {
        match (dimension, self) {
            (Dimension::Temperature, Classification::TooLow) => "too cold",
            (Dimension::Temperature, Classification::TooHigh) => "too hot",
            (Dimension::Precipitation, Classification::TooLow) => "too low",
            (Dimension::Precipitation, Classification::TooHigh) => "too high",
            (_, Classification::Suitable) => "suitable",
        }
    }
}

/// Outcome of checking one weather value against one tolerance range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionAssessment {
    pub dimension: Dimension,
    pub observed: f64,
    pub min: f64,
    pub max: f64,
    pub classification: Classification,
    /// Whether this dimension takes part in the overall verdict
    pub gating: bool,
}

impl DimensionAssessment {
    pub fn new(dimension: Dimension, observed: f64, min: f64, max: f64, gating: bool) -> Self {
        Self {
            dimension,
            observed,
            min,
            max,
            classification: Classification::of(observed, min, max),
            gating,
        }
    }

    pub fn explain(&self) -> String {
        let unit = self.dimension.unit();
        let label = self.classification.label(self.dimension);
        match self.classification {
            Classification::TooLow => format!(
                "{} {}: current {}{}, needs ≥{}{}",
                self.dimension, label, self.observed, unit, self.min, unit
            ),
            Classification::TooHigh => format!(
                "{} {}: current {}{}, needs ≤{}{}",
                self.dimension, label, self.observed, unit, self.max, unit
            ),
            Classification::Suitable => format!(
                "{} {}: current {}{}, within [{}, {}]{}",
                self.dimension, label, self.observed, unit, self.min, self.max, unit
            ),
        }
    }
}

/// Graded suitability index, or a marker that it could not be computed.
///
/// `NotApplicable` is deliberately distinct from `Index(0.0)`: missing
/// tolerance data says nothing about whether a crop would fail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum GradedScore {
    Index(f64),
    NotApplicable,
}

impl GradedScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            GradedScore::Index(v) => Some(*v),
            GradedScore::NotApplicable => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityResult {
    pub verdict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<GradedScore>,
    pub explanations: Vec<String>,
    pub assessments: Vec<DimensionAssessment>,
}

impl SuitabilityResult {
    /// Builds a result from the per-dimension assessments.
    ///
    /// The verdict holds only if at least one gating dimension was assessed
    /// and every gating dimension passed. Dimensions skipped for missing
    /// bounds never appear here, so they neither pass nor fail the crop.
    pub fn from_assessments(assessments: Vec<DimensionAssessment>) -> Self {
        let mut gating = assessments.iter().filter(|a| a.gating).peekable();
        let verdict = gating.peek().is_some() && gating.all(|a| a.classification.is_suitable());
        let explanations = assessments.iter().map(|a| a.explain()).collect();

        Self {
            verdict,
            score: None,
            explanations,
            assessments,
        }
    }

    pub fn with_score(mut self, score: GradedScore) -> Self {
        self.score = Some(score);
        self
    }
}
