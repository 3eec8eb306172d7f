//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as a `lat, lon` string with four decimals
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A geocoded place: the name the user asked for and where it is
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Location name as entered by the user
    pub name: String,
    pub coordinates: Coordinates,
}

impl Location {
    #[must_use]
    pub fn new(name: String, coordinates: Coordinates) -> Self {
        Self { name, coordinates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        let coordinates = Coordinates::new(51.508_53, -0.125_74);
        assert_eq!(coordinates.format(), "51.5085, -0.1257");
    }
}
