//! Weather endpoint client
//!
//! One lookup is one `GET {base}/api/weather/{city}`. There is no retry and
//! no timeout; a slow server keeps the request in flight until it answers or
//! a newer request supersedes it.

use serde::Deserialize;

use crate::error::WeatherError;
use crate::state::{kelvin_to_celsius, WeatherResult};

/// Public instance of the weather service
pub const DEFAULT_API_BASE: &str = "https://checkweather-pzv3.onrender.com";

/// Body of a 2xx response
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    city: String,
    /// Kelvin
    temperature: f64,
    description: String,
    humidity: f64,
    /// Milliseconds since the Unix epoch; some servers send it as a float
    timestamp: f64,
}

impl From<WeatherResponse> for WeatherResult {
    fn from(body: WeatherResponse) -> Self {
        WeatherResult {
            city: body.city,
            temperature_celsius: kelvin_to_celsius(body.temperature),
            description: body.description,
            humidity: body.humidity,
            timestamp_millis: body.timestamp.round() as i64,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WeatherApi {
    http: reqwest::Client,
    base_url: String,
}

impl WeatherApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for `city`, which is sent as one percent-encoded path segment.
    pub fn weather_url(&self, city: &str) -> String {
        format!("{}/api/weather/{}", self.base_url, urlencoding::encode(city))
    }

    /// Fetch and normalise the weather for `city`.
    ///
    /// Any non-2xx status is [`WeatherError::NotFound`], whatever the body says.
    pub async fn fetch(&self, city: &str) -> Result<WeatherResult, WeatherError> {
        if city.is_empty() {
            return Err(WeatherError::EmptyInput);
        }

        let url = self.weather_url(city);
        tracing::debug!(%url, "requesting weather");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::info!(city, status = status.as_u16(), "weather lookup rejected");
            return Err(WeatherError::NotFound);
        }

        let body = response.text().await?;
        let parsed: WeatherResponse = serde_json::from_str(&body)?;
        Ok(parsed.into())
    }
}

impl Default for WeatherApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
