//! Consecutive-wet-day risk tracker
//!
//! Extends the single-day scorer across an ordered day sequence. Repeated
//! wet days compound: saturated ground and soaked gear make each further wet
//! day worse than the first.

use crate::models::DailyWeather;
use crate::scoring::day::{clamp_points, score_day, QualityClass, ScoredDay};
use serde::{Deserialize, Serialize};

/// Options for streak-aware scoring of one site's day sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakOptions {
    /// Precipitation at or above this counts as a wet day (mm)
    pub wet_threshold_mm: f64,
    /// The site's static shelter rating, attached to every day
    pub shelter_rating: f64,
}

impl Default for StreakOptions {
    fn default() -> Self {
        Self {
            wet_threshold_mm: 3.0,
            shelter_rating: 0.0,
        }
    }
}

/// Penalty by consecutive-wet-day count ending at the current day
fn streak_penalty(streak: u32) -> u8 {
    match streak {
        0 | 1 => 0,
        2 => 1,
        3 => 2,
        4 => 3,
        _ => 4,
    }
}

/// Score an ordered day sequence, tracking consecutive wet days.
///
/// A dry day resets the streak to zero before that day is scored, so the
/// streak always equals the number of consecutive wet days ending at the
/// current day. The streak penalty is subtracted from the day's points
/// (reclamped to 0..10) and from the raw figure (unclamped).
#[must_use]
pub fn score_days_with_rain_streak(days: &[DailyWeather], opts: &StreakOptions) -> Vec<ScoredDay> {
    let mut streak: u32 = 0;
    let mut scored = Vec::with_capacity(days.len());

    for day in days {
        let wet = day
            .precipitation_mm
            .is_some_and(|p| p >= opts.wet_threshold_mm);
        if wet {
            streak += 1;
        } else {
            streak = 0;
        }

        let mut scored_day = score_day(day, opts.shelter_rating);
        let penalty = streak_penalty(streak);

        scored_day.wet_day = wet;
        scored_day.rain_streak = streak;
        scored_day.rain_streak_penalty = penalty;
        scored_day.points = clamp_points(i32::from(scored_day.points) - i32::from(penalty));
        scored_day.points_raw -= f64::from(penalty);
        scored_day.quality = QualityClass::from_points(scored_day.points);

        scored.push(scored_day);
    }

    scored
}
