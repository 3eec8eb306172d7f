//! Data models for `TempView`
//!
//! - Location: geocoded coordinates
//! - Series: the raw daily series and the shaped rows derived from it

pub mod location;
pub mod series;

pub use location::{Coordinates, Location};
pub use series::{DailySeries, ShapedRow};
