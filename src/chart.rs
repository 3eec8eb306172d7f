//! Line chart of daily max/min/avg temperatures, rendered to an in-memory PNG

use std::fmt::Display;

use chrono::{Days, NaiveDate};
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use plotters::prelude::*;

use crate::models::ShapedRow;
use crate::{Result, TempViewError};

pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 500;

const MAX_COLOR: RGBColor = RGBColor(31, 119, 180);
const MIN_COLOR: RGBColor = RGBColor(255, 127, 14);
const AVG_COLOR: RGBColor = RGBColor(44, 160, 44);
const MARKER_SIZE: i32 = 4;

/// Chart caption: the label plus how many rows are actually plotted
#[must_use]
pub fn chart_title(label: &str, rows: &[ShapedRow]) -> String {
    format!("{label} Temperature - Past {} Days", rows.len())
}

/// Render `rows` as a PNG line chart captioned with `label`.
///
/// Max and min are solid lines, avg is dashed; every point carries a circle
/// marker. Missing values are skipped. The drawing surface lives only for
/// the duration of this call.
pub fn render_temperature_chart(rows: &[ShapedRow], label: &str) -> Result<Vec<u8>> {
    let (x_start, x_end) = date_bounds(rows)
        .ok_or_else(|| TempViewError::render("no rows to plot"))?;
    let (y_min, y_max) = temperature_bounds(rows);

    let max_points = series_points(rows, |r| r.max_temp);
    let min_points = series_points(rows, |r| r.min_temp);
    let avg_points = series_points(rows, |r| r.avg_temp);

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(chart_title(label, rows), ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(x_start..x_end, y_min..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Temperature (°C)")
            .x_labels(10)
            .y_labels(10)
            .x_label_formatter(&|d: &NaiveDate| d.format("%b %d").to_string())
            .y_label_formatter(&|t: &f64| format!("{t:.0}"))
            .light_line_style(BLACK.mix(0.08))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                max_points.iter().copied(),
                MAX_COLOR.stroke_width(2),
            ))
            .map_err(render_err)?
            .label("Max")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MAX_COLOR.stroke_width(2)));

        chart
            .draw_series(LineSeries::new(
                min_points.iter().copied(),
                MIN_COLOR.stroke_width(2),
            ))
            .map_err(render_err)?
            .label("Min")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MIN_COLOR.stroke_width(2)));

        chart
            .draw_series(DashedLineSeries::new(
                avg_points.iter().copied(),
                8,
                5,
                AVG_COLOR.stroke_width(2),
            ))
            .map_err(render_err)?
            .label("Avg")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], AVG_COLOR.stroke_width(2)));

        for (points, color) in [
            (&max_points, MAX_COLOR),
            (&min_points, MIN_COLOR),
            (&avg_points, AVG_COLOR),
        ] {
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|point| Circle::new(*point, MARKER_SIZE, color.filled())),
                )
                .map_err(render_err)?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    encode_png(&buffer)
}

fn render_err<E: Display>(err: E) -> TempViewError {
    TempViewError::render(err.to_string())
}

fn encode_png(rgb: &[u8]) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, CHART_WIDTH, CHART_HEIGHT, image::ColorType::Rgb8)
        .map_err(render_err)?;
    Ok(png)
}

fn series_points(rows: &[ShapedRow], value: impl Fn(&ShapedRow) -> Option<f64>) -> Vec<(NaiveDate, f64)> {
    rows.iter()
        .filter_map(|row| value(row).map(|v| (row.date, v)))
        .collect()
}

/// Earliest and latest date, widened to one day when they coincide
fn date_bounds(rows: &[ShapedRow]) -> Option<(NaiveDate, NaiveDate)> {
    let start = rows.iter().map(|r| r.date).min()?;
    let end = rows.iter().map(|r| r.date).max()?;
    if start == end {
        let widened = end.checked_add_days(Days::new(1)).unwrap_or(end);
        return Some((start, widened));
    }
    Some((start, end))
}

/// Y-axis range across all plotted values, padded by 10% (at least 1°C)
fn temperature_bounds(rows: &[ShapedRow]) -> (f64, f64) {
    let (min, max) = rows
        .iter()
        .flat_map(|r| [r.max_temp, r.min_temp, r.avg_temp])
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let padding = ((max - min) * 0.1).max(1.0);
    (min - padding, max + padding)
}
