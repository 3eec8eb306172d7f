//! Geocode → fetch → shape → render, one stage after another
//!
//! A pipeline holds nothing but its source. Each call builds its data from
//! scratch and either completes every stage or returns the first error.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument};

use crate::chart::render_temperature_chart;
use crate::models::{Location, ShapedRow};
use crate::shaper::shape_series;
use crate::weather::TemperatureSource;
use crate::{Result, TempViewError};

/// Everything the results page shows for one city
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureReport {
    pub location: Location,
    pub rows: Vec<ShapedRow>,
    #[serde(skip)]
    pub chart_png: Vec<u8>,
}

#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn TemperatureSource>,
}

impl Pipeline {
    pub fn new(source: Arc<dyn TemperatureSource>) -> Self {
        Self { source }
    }

    /// Geocode `city`, fetch its trailing `days` of temperatures and shape them
    #[instrument(skip(self))]
    pub async fn fetch_rows(&self, city: &str, days: u32) -> Result<(Location, Vec<ShapedRow>)> {
        let start_time = Instant::now();

        let coordinates = self.source.geocode(city).await?;
        let series = self.source.fetch_daily(coordinates, days).await?;
        let rows = shape_series(&series)?;

        info!(
            "Shaped {} rows for '{}' in {:.3}s",
            rows.len(),
            city,
            start_time.elapsed().as_secs_f64()
        );
        Ok((Location::new(city.to_string(), coordinates), rows))
    }

    /// Run every stage including the chart, which renders on a blocking thread
    #[instrument(skip(self))]
    pub async fn build_report(&self, city: &str, days: u32) -> Result<TemperatureReport> {
        let (location, rows) = self.fetch_rows(city, days).await?;

        let label = location.name.clone();
        let (rows, chart_png) = tokio::task::spawn_blocking(move || {
            let png = render_temperature_chart(&rows, &label);
            (rows, png)
        })
        .await
        .map_err(|e| TempViewError::render(format!("chart task failed: {e}")))?;

        Ok(TemperatureReport {
            location,
            rows,
            chart_png: chart_png?,
        })
    }
}
