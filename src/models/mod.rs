//! Core data model for sites and daily weather

pub mod site;
pub mod weather;

pub use site::{Coordinate, Site};
pub use weather::DailyWeather;
