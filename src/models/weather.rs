//! Daily weather observations
//!
//! One record per calendar day for a coordinate, as delivered by the
//! forecast collaborator. Every field is optional; a missing value degrades
//! to a neutral scoring contribution and never raises an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw weather for one day at one coordinate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub date: Option<NaiveDate>,
    /// Daily maximum temperature in Celsius
    pub max_temperature_c: Option<f64>,
    /// Precipitation sum in mm
    pub precipitation_mm: Option<f64>,
    /// Daily maximum sustained wind speed in m/s
    pub max_wind_speed_ms: Option<f64>,
    /// Daily maximum wind gust speed in m/s
    pub max_wind_gust_ms: Option<f64>,
    /// Dominant wind direction in degrees from north
    pub dominant_wind_direction_deg: Option<f64>,
}

impl DailyWeather {
    /// Empty record for a known date
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Gap between max gust and sustained max wind, a turbulence-risk proxy.
    /// Missing either reading yields zero.
    #[must_use]
    pub fn gustiness_ms(&self) -> f64 {
        match (self.max_wind_gust_ms, self.max_wind_speed_ms) {
            (Some(gust), Some(wind)) => gust - wind,
            _ => 0.0,
        }
    }
}
