use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one city, as reported by the weather gateway.
///
/// Temperature and humidity are mandatory for scoring but stay optional here
/// so a partial upstream response can be reported as invalid input instead of
/// failing to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: Option<String>,
    pub observed_at: DateTime<Utc>,
    pub temperature_c: Option<f64>,
    pub feels_like_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub precipitation_1h_mm: Option<f64>,
    pub snow_1h_mm: Option<f64>,
    pub cloud_cover_pct: Option<f64>,
    pub conditions: Vec<SkyCondition>,
    pub wind: Option<Wind>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: None,
            observed_at: Utc::now(),
            temperature_c: None,
            feels_like_c: None,
            humidity_pct: None,
            pressure_hpa: None,
            precipitation_1h_mm: None,
            snow_1h_mm: None,
            cloud_cover_pct: None,
            conditions: Vec::new(),
            wind: None,
            sunrise: None,
            sunset: None,
        }
    }

    /// Rainfall over the last hour; no report means no rain.
    pub fn precipitation_mm(&self) -> f64 {
        self.precipitation_1h_mm.unwrap_or(0.0)
    }

    pub fn primary_condition(&self) -> WeatherCondition {
        self.conditions
            .first()
            .map(|c| c.condition)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyCondition {
    pub condition: WeatherCondition,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wind {
    pub speed_ms: f64,
    pub direction_deg: Option<f64>,
    pub gust_ms: Option<f64>,
}

/// Weather condition categories from OpenWeatherMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Other,
}

impl WeatherCondition {
    pub fn from_owm_id(id: u32) -> Self {
        match id {
            200..=232 => WeatherCondition::Thunderstorm,
            300..=321 => WeatherCondition::Drizzle,
            500..=531 => WeatherCondition::Rain,
            600..=622 => WeatherCondition::Snow,
            701 => WeatherCondition::Mist,
            741 => WeatherCondition::Fog,
            800 => WeatherCondition::Clear,
            801..=804 => WeatherCondition::Clouds,
            _ => WeatherCondition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Other => "Other",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
