//! Open-Meteo client for geocoding and daily temperature history
//!
//! Both lookups are single GET requests with a fixed timeout. There is no
//! retry and no caching: every call goes to the network.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{TemperatureSource, date_range, utc_today};
use crate::config::WeatherConfig;
use crate::models::{Coordinates, DailySeries};
use crate::{Result, TempViewError};

/// Weather API client for Open-Meteo
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TempView/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TempViewError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }

    /// Resolve a location name to the coordinates of the best match
    #[instrument(skip(self))]
    pub async fn geocode(&self, location: &str) -> Result<Coordinates> {
        if location.trim().is_empty() {
            return Err(TempViewError::validation("Location cannot be empty"));
        }

        let url = format!(
            "{}?name={}&count=1",
            self.geocoding_url,
            urlencoding::encode(location)
        );

        let body = self.get_text(&url).await?;
        let response: GeocodingResponse = serde_json::from_str(&body).map_err(|e| {
            TempViewError::transport(format!("Invalid geocoding response: {e}"), None)
        })?;

        let Some(first) = response.results.unwrap_or_default().into_iter().next() else {
            warn!("No results found for location '{}'", location);
            return Err(TempViewError::not_found(location));
        };

        info!(
            "Geocoded '{}' to {} ({:.4}, {:.4})",
            location,
            first.name.as_deref().unwrap_or(location),
            first.latitude,
            first.longitude
        );

        Ok(Coordinates::new(first.latitude, first.longitude))
    }

    /// Fetch daily max/min temperatures for `[today - days, today]`
    #[instrument(skip(self))]
    pub async fn fetch_daily_until(
        &self,
        coordinates: Coordinates,
        days: u32,
        today: NaiveDate,
    ) -> Result<DailySeries> {
        let (start_date, end_date) = date_range(days, today);
        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&daily=temperature_2m_max,temperature_2m_min&timezone=UTC",
            self.forecast_url,
            coordinates.latitude,
            coordinates.longitude,
            start_date.format("%Y-%m-%d"),
            end_date.format("%Y-%m-%d"),
        );

        let body = self.get_text(&url).await?;
        let response: ForecastResponse = serde_json::from_str(&body)
            .map_err(|e| TempViewError::no_data(format!("Invalid forecast response: {e}")))?;

        let series = response.into_series()?;
        info!(
            "Fetched {} days of temperatures from {} to {}",
            series.len(),
            start_date,
            end_date
        );
        Ok(series)
    }

    /// Send a GET request and return the body of a successful response
    #[instrument(skip(self, url))]
    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("Open-Meteo request URL: {}", url);
        let start_time = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Network error after {:.3}s: {}", start_time.elapsed().as_secs_f64(), e);
            TempViewError::from(e)
        })?;

        let response = Self::check_status(response).await?;
        let body = response.text().await?;

        debug!(
            "Open-Meteo response ({} bytes) in {:.3}s",
            body.len(),
            start_time.elapsed().as_secs_f64()
        );
        if start_time.elapsed().as_secs() > 5 {
            warn!(
                "Slow API response detected: {:.3}s",
                start_time.elapsed().as_secs_f64()
            );
        }

        Ok(body)
    }

    /// Turn a non-success status into a transport error carrying the upstream reason
    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.reason)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        warn!("API request failed with status {}: {}", status, message);
        Err(TempViewError::transport(message, Some(status.as_u16())))
    }
}

#[async_trait]
impl TemperatureSource for OpenMeteoClient {
    async fn geocode(&self, location: &str) -> Result<Coordinates> {
        OpenMeteoClient::geocode(self, location).await
    }

    async fn fetch_daily(&self, coordinates: Coordinates, days: u32) -> Result<DailySeries> {
        self.fetch_daily_until(coordinates, days, utc_today()).await
    }
}

/// Geocoding response from Open-Meteo
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: Option<String>,
    latitude: f64,
    longitude: f64,
}

/// Forecast response from Open-Meteo, restricted to the daily block
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyData>,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Option<Vec<String>>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Option<Vec<Option<f64>>>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Option<Vec<Option<f64>>>,
}

/// Error body Open-Meteo sends with 4xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: Option<String>,
}

impl ForecastResponse {
    fn into_series(self) -> Result<DailySeries> {
        let daily = self
            .daily
            .ok_or_else(|| TempViewError::no_data("response has no 'daily' field"))?;

        Ok(DailySeries {
            time: daily
                .time
                .ok_or_else(|| TempViewError::no_data("daily series has no 'time' array"))?,
            temperature_max: daily.temperature_max.ok_or_else(|| {
                TempViewError::no_data("daily series has no 'temperature_2m_max' array")
            })?,
            temperature_min: daily.temperature_min.ok_or_else(|| {
                TempViewError::no_data("daily series has no 'temperature_2m_min' array")
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_response_into_series() {
        let json = r#"{
            "latitude": 51.5,
            "longitude": -0.12,
            "daily": {
                "time": ["2024-03-01", "2024-03-02"],
                "temperature_2m_max": [11.2, null],
                "temperature_2m_min": [4.0, 5.5]
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(json).unwrap();
        let series = response.into_series().unwrap();
        assert_eq!(series.time, vec!["2024-03-01", "2024-03-02"]);
        assert_eq!(series.temperature_max, vec![Some(11.2), None]);
        assert_eq!(series.temperature_min, vec![Some(4.0), Some(5.5)]);
    }

    #[test]
    fn test_forecast_response_missing_daily() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"latitude": 51.5, "longitude": -0.12}"#).unwrap();
        let err = response.into_series().unwrap_err();
        assert!(matches!(err, TempViewError::NoData { .. }));
    }

    #[test]
    fn test_forecast_response_missing_array() {
        let response: ForecastResponse =
            serde_json::from_str(r#"{"daily": {"time": ["2024-03-01"], "temperature_2m_max": [1.0]}}"#)
                .unwrap();
        let err = response.into_series().unwrap_err();
        assert!(err.to_string().contains("temperature_2m_min"));
    }

    #[test]
    fn test_geocoding_response_without_results() {
        let response: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(response.results.is_none());
    }

    #[tokio::test]
    async fn test_blank_location_fails_without_request() {
        let mut config = WeatherConfig::default();
        // Nothing listens here; a request would fail with a transport error instead.
        config.geocoding_url = "http://127.0.0.1:9".to_string();
        let client = OpenMeteoClient::new(&config).unwrap();

        let err = client.geocode("   ").await.unwrap_err();
        assert!(matches!(err, TempViewError::Validation { .. }));
    }

    #[tokio::test]
    #[ignore] // Hits the live service: cargo test -- --ignored
    async fn test_geocode_london_live() {
        let client = OpenMeteoClient::new(&WeatherConfig::default()).unwrap();
        let coordinates = client.geocode("London").await.unwrap();
        assert!((coordinates.latitude - 51.5).abs() < 0.1);
        assert!((coordinates.longitude + 0.12).abs() < 0.1);
    }
}
