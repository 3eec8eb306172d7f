use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};

use crate::Result;
use crate::models::{Coordinates, DailySeries};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Remote source of coordinates and daily temperature extremes
#[async_trait]
pub trait TemperatureSource: Send + Sync {
    /// Resolve a trimmed, non-empty place name to coordinates
    async fn geocode(&self, location: &str) -> Result<Coordinates>;

    /// Fetch the daily series for `[today - days, today]` (UTC)
    async fn fetch_daily(&self, coordinates: Coordinates, days: u32) -> Result<DailySeries>;
}

/// Inclusive UTC date range ending `today` and starting `days` before it.
///
/// The range covers `days + 1` calendar days. Day counts reaching past the
/// earliest representable date clamp to it.
#[must_use]
pub fn date_range(days: u32, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Today's calendar date in UTC
#[must_use]
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}
