//! `TempView` - recent daily temperature extremes for any city
//!
//! This library geocodes a place name, fetches its trailing daily max/min
//! temperatures from Open-Meteo, derives the daily average, renders a PNG
//! chart and serves the results as HTML, CSV and JSON.

pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod pages;
pub mod pipeline;
pub mod shaper;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use chart::render_temperature_chart;
pub use config::TempViewConfig;
pub use error::TempViewError;
pub use models::{Coordinates, DailySeries, Location, ShapedRow};
pub use pipeline::{Pipeline, TemperatureReport};
pub use shaper::shape_series;
pub use weather::{OpenMeteoClient, TemperatureSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TempViewError>;
