//! Current-weather API client (OpenWeatherMap-compatible)

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::{ApiConfig, UNITS};
use crate::state::WeatherSnapshot;

/// Why a fetch failed
///
/// All variants end up as one banner message; see [`FetchError::user_message`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response (connect failure, timeout, client setup)
    #[error("Could not reach the weather service: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-2xx status, with the server's `message` when it sent one
    #[error("Weather service returned {status}")]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// 2xx with a body we could not use
    #[error("Unexpected response from weather service: {0}")]
    Parse(String),
}

impl FetchError {
    /// Text for the error banner: the server's message if present
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    #[serde(default)]
    sys: Sys,
    main: Main,
    weather: Vec<Condition>,
    #[serde(default)]
    visibility: Option<u32>,
    wind: Wind,
}

#[derive(Debug, Default, Deserialize)]
struct Sys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Decode a successful response body into a snapshot
pub fn parse_snapshot(body: &str) -> Result<WeatherSnapshot, FetchError> {
    let data: CurrentResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    // Only the first condition is used
    let condition = data
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Parse("no weather condition in response".into()))?;

    Ok(WeatherSnapshot {
        name: data.name,
        country: data.sys.country,
        temperature: data.main.temp,
        feels_like: data.main.feels_like,
        humidity: data.main.humidity,
        visibility: data.visibility,
        wind_speed: data.wind.speed,
        condition: condition.main,
        description: condition.description,
    })
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client bound to one [`ApiConfig`]
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    config: ApiConfig,
}

impl WeatherClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(FetchError::Network)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch current weather for a free-text location ("city" or "city,cc")
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, query: &str) -> Result<WeatherSnapshot, FetchError> {
        let response = self
            .http
            .get(self.config.weather_url())
            .query(&[
                ("q", query),
                ("appid", self.config.api_key.as_str()),
                ("units", UNITS),
            ])
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::Network)?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(status = status.as_u16(), ?message, "weather request rejected");
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let snapshot = parse_snapshot(&body)?;
        debug!(name = %snapshot.name, condition = %snapshot.condition, "weather loaded");
        Ok(snapshot)
    }
}
