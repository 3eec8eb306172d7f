//! CSV export of shaped rows

use crate::models::ShapedRow;
use crate::{Result, TempViewError};

/// Header line written before the rows
pub const CSV_HEADER: &str = "date,max_temp,min_temp,avg_temp";

/// Write rows as CSV with a header; missing values become empty cells
pub fn to_csv(rows: &[ShapedRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    if rows.is_empty() {
        writer
            .write_record(CSV_HEADER.split(','))
            .map_err(csv_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TempViewError::export(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| TempViewError::export(format!("CSV is not UTF-8: {e}")))
}

/// Parse CSV produced by [`to_csv`] back into rows
pub fn parse_csv(text: &str) -> Result<Vec<ShapedRow>> {
    csv::Reader::from_reader(text.as_bytes())
        .deserialize()
        .map(|record| record.map_err(csv_err))
        .collect()
}

/// Download filename for a city/day-count export
#[must_use]
pub fn csv_filename(city: &str, days: u32) -> String {
    let safe: String = city
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{safe}_weather_{days}d.csv")
}

fn csv_err(err: csv::Error) -> TempViewError {
    TempViewError::export(format!("CSV error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_rows() -> Vec<ShapedRow> {
        vec![
            ShapedRow::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), Some(11.5), Some(4.25)),
            ShapedRow::new(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), Some(-0.7), Some(-8.25)),
            ShapedRow::new(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(), None, Some(2.0)),
        ]
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&sample_rows()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "2024-03-01,11.5,4.25,7.875");
        assert_eq!(lines[3], "2024-03-03,,2.0,");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_csv_parses_back_to_same_rows() {
        let rows = sample_rows();
        let parsed = parse_csv(&to_csv(&rows).unwrap()).unwrap();

        assert_eq!(parsed.len(), rows.len());
        for (original, parsed) in rows.iter().zip(&parsed) {
            assert_eq!(original.date, parsed.date);
            for (a, b) in [
                (original.max_temp, parsed.max_temp),
                (original.min_temp, parsed.min_temp),
                (original.avg_temp, parsed.avg_temp),
            ] {
                match (a, b) {
                    (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9),
                    (a, b) => assert_eq!(a, b),
                }
            }
        }
    }

    #[test]
    fn test_empty_csv_still_has_header() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), CSV_HEADER);
        assert!(parse_csv(&csv).unwrap().is_empty());
    }

    #[test]
    fn test_csv_filename() {
        assert_eq!(csv_filename("London", 7), "London_weather_7d.csv");
        assert_eq!(csv_filename("New York", 30), "New_York_weather_30d.csv");
        assert_eq!(csv_filename("a\"b", 1), "a_b_weather_1d.csv");
    }
}
