//! Shelter and wind estimation from a day sequence
//!
//! Circular statistics over daily dominant wind directions plus a weekly
//! shelter score combining average wind load with directional stability. This
//! dynamic signal is secondary to a site's static shelter rating (which the
//! relocation engine applies per day); the two describe the same exposure
//! concept from forecast data and site metadata respectively.

use crate::models::DailyWeather;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vector mean of directions in degrees, normalized to [0, 360).
///
/// `None` for an empty sample.
#[must_use]
pub fn circular_mean_deg(directions_deg: &[f64]) -> Option<f64> {
    if directions_deg.is_empty() {
        return None;
    }

    let (sin_sum, cos_sum) = directions_deg.iter().fold((0.0f64, 0.0f64), |(s, c), d| {
        let rad = d.to_radians();
        (s + rad.sin(), c + rad.cos())
    });

    Some(sin_sum.atan2(cos_sum).to_degrees().rem_euclid(360.0))
}

/// Approximate circular standard deviation in degrees.
///
/// Uses `std = sqrt(-2 ln R)` where `R` is the mean resultant length. A
/// degenerate sample (`R` at or below zero) reports the maximum spread of
/// 180 degrees. `None` for an empty sample.
#[must_use]
pub fn circular_std_deg(directions_deg: &[f64]) -> Option<f64> {
    if directions_deg.is_empty() {
        return None;
    }

    let n = directions_deg.len() as f64;
    let (sin_sum, cos_sum) = directions_deg.iter().fold((0.0f64, 0.0f64), |(s, c), d| {
        let rad = d.to_radians();
        (s + rad.sin(), c + rad.cos())
    });

    let resultant = (sin_sum.powi(2) + cos_sum.powi(2)).sqrt() / n;
    if resultant <= 0.0 {
        return Some(180.0);
    }

    let std_deg = (-2.0 * resultant.min(1.0).ln()).sqrt().to_degrees();
    Some(std_deg.min(180.0))
}

/// Qualitative shelter label derived from the weekly score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelterLabel {
    /// Score >= 75
    High,
    /// Score >= 50
    Medium,
    /// Anything below
    Low,
}

impl ShelterLabel {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 75.0 => ShelterLabel::High,
            s if s >= 50.0 => ShelterLabel::Medium,
            _ => ShelterLabel::Low,
        }
    }
}

impl fmt::Display for ShelterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShelterLabel::High => write!(f, "High"),
            ShelterLabel::Medium => write!(f, "Medium"),
            ShelterLabel::Low => write!(f, "Low"),
        }
    }
}

/// Weekly shelter estimate for one site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyShelter {
    /// Combined score: `100 - wind load + stability bonus`
    pub score: f64,
    pub label: ShelterLabel,
    /// Average of the available daily max wind speeds (m/s)
    pub average_wind_ms: f64,
    /// Vector mean of the daily dominant directions, if any were reported
    pub dominant_direction_deg: Option<f64>,
    /// Circular spread of the daily dominant directions
    pub direction_std_deg: f64,
}

/// Estimate weekly shelter from a day sequence.
///
/// Steadier wind direction earns a stability bonus: predictable wind is
/// easier to pitch against than shifting wind of the same strength. `None`
/// when the sequence carries no wind speed samples at all.
#[must_use]
pub fn weekly_shelter_score(days: &[DailyWeather]) -> Option<WeeklyShelter> {
    let winds: Vec<f64> = days.iter().filter_map(|d| d.max_wind_speed_ms).collect();
    if winds.is_empty() {
        return None;
    }

    let average_wind_ms = winds.iter().sum::<f64>() / winds.len() as f64;

    let directions: Vec<f64> = days
        .iter()
        .filter_map(|d| d.dominant_wind_direction_deg)
        .collect();
    // Without direction samples the spread is treated as maximal: no
    // stability can be claimed.
    let direction_std_deg = circular_std_deg(&directions).unwrap_or(180.0);
    let dominant_direction_deg = circular_mean_deg(&directions);

    let wind_load = clamp01(average_wind_ms / 15.0) * 70.0;
    let stability_bonus = (1.0 - clamp01(direction_std_deg / 90.0)) * 30.0;
    let score = 100.0 - wind_load + stability_bonus;

    Some(WeeklyShelter {
        score,
        label: ShelterLabel::from_score(score),
        average_wind_ms,
        dominant_direction_deg,
        direction_std_deg,
    })
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn windy_day(speed: f64, direction: Option<f64>) -> DailyWeather {
        let mut day = DailyWeather::for_date(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        day.max_wind_speed_ms = Some(speed);
        day.dominant_wind_direction_deg = direction;
        day
    }

    #[test]
    fn test_circular_mean_handles_wraparound() {
        let mean = circular_mean_deg(&[350.0, 10.0]).unwrap();
        assert!(mean < 1.0 || mean > 359.0, "mean was {mean}");
    }

    #[test]
    fn test_circular_mean_simple() {
        let mean = circular_mean_deg(&[80.0, 100.0]).unwrap();
        assert!((mean - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_circular_std_tight_cluster_is_small() {
        let std = circular_std_deg(&[90.0, 92.0, 88.0, 91.0]).unwrap();
        assert!(std < 5.0, "std was {std}");
    }

    #[test]
    fn test_circular_std_opposed_directions_max_spread() {
        // Opposite directions cancel, resultant length goes to zero
        let std = circular_std_deg(&[0.0, 180.0]).unwrap();
        assert!((std - 180.0).abs() < 1.0, "std was {std}");
    }

    #[test]
    fn test_circular_stats_empty_sample() {
        assert!(circular_mean_deg(&[]).is_none());
        assert!(circular_std_deg(&[]).is_none());
    }

    #[test]
    fn test_shelter_score_calm_stable_week_is_high() {
        let days: Vec<DailyWeather> = (0..7).map(|_| windy_day(2.0, Some(270.0))).collect();
        let shelter = weekly_shelter_score(&days).unwrap();
        assert_eq!(shelter.label, ShelterLabel::High);
        assert!(shelter.score > 100.0);
        assert!((shelter.average_wind_ms - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_shelter_score_stormy_shifting_week_is_low() {
        let directions = [0.0, 120.0, 240.0, 60.0, 180.0, 300.0, 90.0];
        let days: Vec<DailyWeather> = directions
            .iter()
            .map(|&d| windy_day(16.0, Some(d)))
            .collect();
        let shelter = weekly_shelter_score(&days).unwrap();
        assert_eq!(shelter.label, ShelterLabel::Low);
        // Full wind load, no stability bonus
        assert!(shelter.score <= 40.0, "score was {}", shelter.score);
    }

    #[test]
    fn test_shelter_score_none_without_wind_samples() {
        let days = vec![DailyWeather::default(), DailyWeather::default()];
        assert!(weekly_shelter_score(&days).is_none());
        assert!(weekly_shelter_score(&[]).is_none());
    }

    #[test]
    fn test_shelter_score_missing_directions_gets_no_stability_bonus() {
        let days: Vec<DailyWeather> = (0..3).map(|_| windy_day(6.0, None)).collect();
        let shelter = weekly_shelter_score(&days).unwrap();
        assert!(shelter.dominant_direction_deg.is_none());
        assert_eq!(shelter.direction_std_deg, 180.0);
        // 100 - (6/15)*70 + 0
        assert!((shelter.score - 72.0).abs() < 1e-9);
        assert_eq!(shelter.label, ShelterLabel::Medium);
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(ShelterLabel::from_score(75.0), ShelterLabel::High);
        assert_eq!(ShelterLabel::from_score(74.9), ShelterLabel::Medium);
        assert_eq!(ShelterLabel::from_score(50.0), ShelterLabel::Medium);
        assert_eq!(ShelterLabel::from_score(49.9), ShelterLabel::Low);
    }
}
