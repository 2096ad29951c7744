//! Single-day condition scorer
//!
//! Seasonally-adjusted multi-factor penalty model. Pure and deterministic:
//! the same input always produces the same output, missing readings degrade
//! to neutral contributions, and nothing here can fail.

use crate::models::DailyWeather;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoring season, resolved from the calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// May through September
    Summer,
    /// October through April
    Winter,
}

impl Season {
    /// Resolve the season for a day. A missing or invalid date scores as
    /// summer, the stricter profile.
    #[must_use]
    pub fn for_day(day: &DailyWeather) -> Self {
        match day.date.map(|d| d.month()) {
            Some(5..=9) => Season::Summer,
            Some(_) => Season::Winter,
            None => Season::Summer,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Summer => write!(f, "Summer"),
            Season::Winter => write!(f, "Winter"),
        }
    }
}

/// Seasonal weighting profile
struct SeasonProfile {
    temp_weight: f64,
    wind_weight: f64,
    rain_weight: f64,
    base_floor: u8,
}

impl SeasonProfile {
    fn for_season(season: Season) -> Self {
        match season {
            Season::Summer => Self {
                temp_weight: 1.0,
                wind_weight: 1.0,
                rain_weight: 1.0,
                base_floor: 0,
            },
            Season::Winter => Self {
                temp_weight: 0.35,
                wind_weight: 1.0,
                rain_weight: 1.0,
                base_floor: 4,
            },
        }
    }
}

/// Display classification of a day's final points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityClass {
    /// 9-10 points
    Best,
    /// 7-8 points
    Good,
    /// 4-6 points
    Ok,
    /// 1-3 points
    Fair,
    /// 0 points
    Bad,
}

impl QualityClass {
    #[must_use]
    pub fn from_points(points: u8) -> Self {
        match points {
            p if p >= 9 => QualityClass::Best,
            p if p >= 7 => QualityClass::Good,
            p if p >= 4 => QualityClass::Ok,
            p if p >= 1 => QualityClass::Fair,
            _ => QualityClass::Bad,
        }
    }
}

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityClass::Best => write!(f, "Best"),
            QualityClass::Good => write!(f, "Good"),
            QualityClass::Ok => write!(f, "Ok"),
            QualityClass::Fair => write!(f, "Fair"),
            QualityClass::Bad => write!(f, "Bad"),
        }
    }
}

/// One scored day: raw weather plus the full component breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDay {
    /// The raw observations this score was derived from
    pub weather: DailyWeather,
    pub season: Season,
    /// Temperature-derived base points, 0..10
    pub base_points: u8,
    pub wind_penalty: u8,
    pub rain_penalty: u8,
    pub gust_penalty: u8,
    /// Static-shelter offset against gust exposure
    pub shelter_bonus: u8,
    /// Precipitation met the wet-day threshold
    pub wet_day: bool,
    /// Consecutive wet days ending at this day
    pub rain_streak: u32,
    /// Penalty derived from the streak length, 0..4
    pub rain_streak_penalty: u8,
    /// Final display points, clamped to 0..10
    pub points: u8,
    /// Pre-clamp linear combination, preserved for unbiased cross-site
    /// comparison: two very bad days can both clamp to 0 and hide a real
    /// difference.
    pub points_raw: f64,
    pub quality: QualityClass,
    /// The base site's points for the same date, injected by the relocation
    /// engine into candidate day records for day-by-day comparison
    pub base_site_points: Option<u8>,
}

/// Score one day's raw weather against a site's static shelter rating.
///
/// Streak bookkeeping (`wet_day`, `rain_streak`, `rain_streak_penalty`) is
/// zeroed here; [`crate::scoring::streak`] fills it in when scoring a day
/// sequence.
#[must_use]
pub fn score_day(day: &DailyWeather, shelter_rating: f64) -> ScoredDay {
    let season = Season::for_day(day);
    let profile = SeasonProfile::for_season(season);

    let base_points = base_points_from_temperature(day.max_temperature_c, &profile);
    let wind_penalty = wind_penalty(day.max_wind_speed_ms, &profile);
    let rain_penalty = rain_penalty(day.precipitation_mm, &profile);
    let gust_penalty = gust_penalty(day, season);
    let shelter_bonus = shelter_bonus(gust_penalty, shelter_rating);

    let raw = f64::from(base_points) - f64::from(wind_penalty) - f64::from(rain_penalty)
        - f64::from(gust_penalty)
        + f64::from(shelter_bonus);
    let points = clamp_points(
        i32::from(base_points) - i32::from(wind_penalty) - i32::from(rain_penalty)
            - i32::from(gust_penalty)
            + i32::from(shelter_bonus),
    );

    ScoredDay {
        weather: day.clone(),
        season,
        base_points,
        wind_penalty,
        rain_penalty,
        gust_penalty,
        shelter_bonus,
        wet_day: false,
        rain_streak: 0,
        rain_streak_penalty: 0,
        points,
        points_raw: raw,
        quality: QualityClass::from_points(points),
        base_site_points: None,
    }
}

pub(crate) fn clamp_points(points: i32) -> u8 {
    points.clamp(0, 10) as u8
}

/// Base points from daily maximum temperature, scaled by the seasonal
/// temperature weight and floored at the seasonal base floor.
fn base_points_from_temperature(max_temperature_c: Option<f64>, profile: &SeasonProfile) -> u8 {
    // A missing reading takes the lowest tier; the seasonal floor still applies.
    let tier: u8 = match max_temperature_c {
        Some(t) if t > 14.0 => 10,
        Some(t) if t >= 12.0 => 8,
        Some(t) if t >= 8.0 => 5,
        Some(t) if t >= 6.0 => 2,
        _ => 0,
    };

    let scaled = (f64::from(tier) * profile.temp_weight).round() as i32;
    scaled.clamp(i32::from(profile.base_floor), 10) as u8
}

/// Penalty from sustained max wind speed. Boundary values take the lower tier.
fn wind_penalty(max_wind_speed_ms: Option<f64>, profile: &SeasonProfile) -> u8 {
    let tier: u8 = match max_wind_speed_ms {
        Some(w) if w > 15.0 => 10,
        Some(w) if w > 10.0 => 5,
        Some(w) if w > 5.0 => 2,
        _ => 0,
    };

    (f64::from(tier) * profile.wind_weight).round() as u8
}

/// Penalty from precipitation. Boundary values take the higher tier.
fn rain_penalty(precipitation_mm: Option<f64>, profile: &SeasonProfile) -> u8 {
    let tier: u8 = match precipitation_mm {
        Some(p) if p >= 4.0 => 5,
        Some(p) if p >= 1.0 => 2,
        _ => 0,
    };

    (f64::from(tier) * profile.rain_weight).round() as u8
}

/// Penalty from the gust-over-wind gap. Winter amplifies turbulence risk.
fn gust_penalty(day: &DailyWeather, season: Season) -> u8 {
    let diff = day.gustiness_ms();
    if diff < 2.9 {
        return 0;
    }

    let base: u8 = if diff < 6.0 {
        1
    } else if diff < 10.0 {
        2
    } else {
        3
    };

    match season {
        Season::Summer => base,
        Season::Winter => ((f64::from(base) * 1.6).round() as u8).min(5),
    }
}

/// Static shelter offsets gust exposure: a fully sheltered site (rating 10)
/// cancels the gust penalty, and the bonus never exceeds it.
fn shelter_bonus(gust_penalty: u8, shelter_rating: f64) -> u8 {
    let rating = shelter_rating.clamp(0.0, 10.0);
    let bonus = (f64::from(gust_penalty) * rating / 10.0).round() as u8;
    bonus.min(gust_penalty)
}
