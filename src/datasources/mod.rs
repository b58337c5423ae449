pub mod ecocrop;
pub mod openweathermap;

pub use ecocrop::EcoCropLoader;
pub use openweathermap::OpenWeatherMapClient;

use crate::error::Result;
use crate::models::WeatherSnapshot;
use std::future::Future;

/// Source of current weather for a named city.
///
/// Implementations report an unknown city as `NotFound` and any transport or
/// upstream failure as `UpstreamUnavailable`.
pub trait WeatherGateway: Send + Sync {
    fn fetch_weather(&self, city: &str) -> impl Future<Output = Result<WeatherSnapshot>> + Send;
}
