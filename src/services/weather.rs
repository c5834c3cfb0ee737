//! Weather Source collaborator.
//!
//! The engine never fetches weather itself; the recommendations handler
//! resolves current conditions through this abstraction before invoking it.
//! Providers are pluggable so tests can run against a fixed observation.

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::WeatherCondition;

/// Current conditions for a location, as consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub condition: WeatherCondition,
}

/// Trait for current-conditions providers
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for a free-form location string.
    async fn current(&self, location: &str) -> AppResult<WeatherObservation>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// weatherapi.com-style current conditions response
#[derive(Debug, Deserialize)]
struct ApiCurrentResponse {
    current: ApiCurrent,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: f64,
    condition: ApiConditionText,
}

#[derive(Debug, Deserialize)]
struct ApiConditionText {
    text: String,
}

/// HTTP client for a weatherapi.com-compatible endpoint.
#[derive(Clone)]
pub struct WeatherApiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, location: &str) -> AppResult<WeatherObservation> {
        let url = format!("{}/current.json", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Weather(format!(
                "weather lookup for '{}' failed with status {}",
                location,
                response.status()
            )));
        }

        let body: ApiCurrentResponse = response.json().await?;
        let condition = bucket_condition(&body.current.condition.text);

        tracing::debug!(
            location,
            temperature_c = body.current.temp_c,
            condition = ?condition,
            "Weather observation fetched"
        );

        Ok(WeatherObservation {
            temperature_c: body.current.temp_c,
            condition,
        })
    }

    fn name(&self) -> &'static str {
        "weatherapi"
    }
}

/// Maps free-form condition text onto the enumerated set. Unrecognized
/// descriptions fall back to clear; the engine treats any weather value as
/// provided.
fn bucket_condition(text: &str) -> WeatherCondition {
    let lowered = text.to_ascii_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lowered.contains(n));

    if has(&["thunder", "storm", "hurricane", "tornado"]) {
        WeatherCondition::Extreme
    } else if has(&["snow", "sleet", "blizzard", "ice"]) {
        WeatherCondition::Snow
    } else if has(&["rain", "drizzle", "shower"]) {
        WeatherCondition::Rain
    } else if has(&["wind", "gale", "breezy"]) {
        WeatherCondition::Wind
    } else {
        WeatherCondition::Clear
    }
}

/// Provider returning a constant observation, for tests and local runs
/// without an API key.
#[derive(Debug, Clone, Copy)]
pub struct FixedWeatherProvider(pub WeatherObservation);

#[async_trait::async_trait]
impl WeatherProvider for FixedWeatherProvider {
    async fn current(&self, _location: &str) -> AppResult<WeatherObservation> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
