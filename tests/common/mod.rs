//! Shared helpers: Open-Meteo stand-ins on a wiremock server

#![allow(dead_code)]

use serde_json::{Value, json};
use tempview::config::WeatherConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GEOCODING_PATH: &str = "/v1/search";
pub const FORECAST_PATH: &str = "/v1/forecast";

/// Weather config pointing both endpoints at the mock server
pub fn weather_config(server: &MockServer) -> WeatherConfig {
    WeatherConfig {
        geocoding_url: format!("{}{GEOCODING_PATH}", server.uri()),
        forecast_url: format!("{}{FORECAST_PATH}", server.uri()),
        timeout_seconds: 5,
    }
}

pub fn london_geocoding() -> Value {
    json!({
        "results": [{
            "id": 2643743,
            "name": "London",
            "latitude": 51.50853,
            "longitude": -0.12574,
            "country": "United Kingdom",
            "admin1": "England"
        }],
        "generationtime_ms": 0.7
    })
}

/// Eight days of readings, as Open-Meteo returns for `days=7`
pub fn eight_day_forecast() -> Value {
    json!({
        "latitude": 51.5,
        "longitude": -0.119_999_886,
        "timezone": "UTC",
        "daily_units": {"time": "iso8601", "temperature_2m_max": "°C", "temperature_2m_min": "°C"},
        "daily": {
            "time": [
                "2024-03-03", "2024-03-04", "2024-03-05", "2024-03-06",
                "2024-03-07", "2024-03-08", "2024-03-09", "2024-03-10"
            ],
            "temperature_2m_max": [10.5, 11.2, 9.8, 12.0, 13.4, 11.1, 10.0, 9.5],
            "temperature_2m_min": [4.1, 5.0, 3.2, 6.6, 7.0, 5.5, 4.4, 2.9]
        }
    })
}

pub async fn mount_london(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GEOCODING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_geocoding()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(eight_day_forecast()))
        .mount(server)
        .await;
}
