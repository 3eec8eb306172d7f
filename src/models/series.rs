//! Daily temperature series as received upstream, and the rows shaped from it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw per-day temperature extremes, as three index-aligned arrays.
///
/// Values may be `None` where the upstream service has no observation yet.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DailySeries {
    /// ISO `YYYY-MM-DD` dates, ascending
    pub time: Vec<String>,
    /// Daily maximum in °C
    pub temperature_max: Vec<Option<f64>>,
    /// Daily minimum in °C
    pub temperature_min: Vec<Option<f64>>,
}

impl DailySeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// One display-ready day: extremes plus their mean
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShapedRow {
    pub date: NaiveDate,
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    /// Always `(max_temp + min_temp) / 2` when both are present
    pub avg_temp: Option<f64>,
}

impl ShapedRow {
    #[must_use]
    pub fn new(date: NaiveDate, max_temp: Option<f64>, min_temp: Option<f64>) -> Self {
        let avg_temp = max_temp.zip(min_temp).map(|(max, min)| (max + min) / 2.0);
        Self {
            date,
            max_temp,
            min_temp,
            avg_temp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_is_mean_of_extremes() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let row = ShapedRow::new(date, Some(12.5), Some(3.1));
        assert_eq!(row.avg_temp, Some((12.5 + 3.1) / 2.0));
    }

    #[test]
    fn test_average_missing_when_extreme_missing() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(ShapedRow::new(date, None, Some(3.1)).avg_temp, None);
        assert_eq!(ShapedRow::new(date, Some(3.1), None).avg_temp, None);
    }
}
