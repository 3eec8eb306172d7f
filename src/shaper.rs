//! Turns a raw daily series into display rows with a derived average

use chrono::NaiveDate;

use crate::models::{DailySeries, ShapedRow};
use crate::{Result, TempViewError};

/// Shape the three parallel arrays of `series` into one row per day.
///
/// Order is preserved and nothing is dropped. Arrays of unequal length are a
/// contract violation and fail immediately.
pub fn shape_series(series: &DailySeries) -> Result<Vec<ShapedRow>> {
    let days = series.time.len();
    if series.temperature_max.len() != days || series.temperature_min.len() != days {
        return Err(TempViewError::shape(format!(
            "array lengths differ: time={}, temperature_2m_max={}, temperature_2m_min={}",
            days,
            series.temperature_max.len(),
            series.temperature_min.len()
        )));
    }

    series
        .time
        .iter()
        .zip(&series.temperature_max)
        .zip(&series.temperature_min)
        .map(|((date, max), min)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| TempViewError::shape(format!("invalid date '{date}': {e}")))?;
            Ok(ShapedRow::new(date, *max, *min))
        })
        .collect()
}
