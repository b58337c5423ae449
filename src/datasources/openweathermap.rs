use super::WeatherGateway;
use crate::config::OpenWeatherMapConfig;
use crate::error::{CropCheckError, Result};
use crate::models::{SkyCondition, WeatherCondition, WeatherSnapshot, Wind};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap current weather response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    dt: Option<i64>,
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: Option<OwmWind>,
    #[serde(default)]
    clouds: Option<OwmClouds>,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
    #[serde(default)]
    sys: Option<OwmSys>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    #[serde(default)]
    deg: Option<f64>,
    #[serde(default)]
    gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64, // cloudiness percentage
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    sunrise: Option<i64>,
    #[serde(default)]
    sunset: Option<i64>,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CropCheckError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions for a city (metric units)
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/weather", self.config.base_url.trim_end_matches('/')),
            &[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ],
        )
        .map_err(|e| CropCheckError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                CropCheckError::UpstreamUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CropCheckError::NotFound(format!(
                "City '{}' not found",
                city
            )));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CropCheckError::UpstreamUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            CropCheckError::UpstreamUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(convert_response(city, owm_response))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        match self.fetch_current("London").await {
            Ok(_) => Ok(true),
            Err(CropCheckError::UpstreamUnavailable(e)) => {
                tracing::warn!("OpenWeatherMap connection test failed: {}", e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

impl WeatherGateway for OpenWeatherMapClient {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot> {
        self.fetch_current(city).await
    }
}

fn convert_response(requested_city: &str, response: OwmCurrentResponse) -> WeatherSnapshot {
    let mut snapshot = WeatherSnapshot::new(if response.name.is_empty() {
        requested_city.to_string()
    } else {
        response.name
    });

    if let Some(observed_at) = response.dt.and_then(timestamp) {
        snapshot.observed_at = observed_at;
    }

    if let Some(main) = response.main {
        snapshot.temperature_c = main.temp.filter(|t| t.is_finite());
        snapshot.feels_like_c = main.feels_like;
        snapshot.humidity_pct = main.humidity.filter(|h| h.is_finite());
        snapshot.pressure_hpa = main.pressure;
    }

    snapshot.conditions = response
        .weather
        .iter()
        .map(|w| SkyCondition {
            condition: WeatherCondition::from_owm_id(w.id),
            description: w.description.clone(),
        })
        .collect();

    snapshot.wind = response.wind.map(|w| Wind {
        speed_ms: w.speed,
        direction_deg: w.deg,
        gust_ms: w.gust,
    });
    snapshot.cloud_cover_pct = response.clouds.map(|c| c.all);
    snapshot.precipitation_1h_mm = response.rain.and_then(|r| r.one_hour);
    snapshot.snow_1h_mm = response.snow.and_then(|s| s.one_hour);

    if let Some(sys) = response.sys {
        snapshot.country = sys.country;
        snapshot.sunrise = sys.sunrise.and_then(timestamp);
        snapshot.sunset = sys.sunset.and_then(timestamp);
    }

    snapshot
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}
