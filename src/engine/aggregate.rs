//! Per-site window aggregation
//!
//! Reduces a scored day-window to one weighted figure per site. Nearer days
//! weigh more (`weight[i] = decay^i`), and a worst-day guardrail keeps a
//! single miserable day from hiding behind a good average.

use crate::config::RelocationConfig;
use crate::scoring::ScoredDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weighted per-category totals over a window
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentTotals {
    /// Temperature-derived base points
    pub temp: f64,
    pub wind: f64,
    pub rain: f64,
    pub gust: f64,
    pub rain_streak: f64,
    pub shelter: f64,
}

/// One site's aggregate over a scored window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowAggregate {
    /// Display figure, 0..10, guardrailed
    pub total: f64,
    /// Comparison figure: weighted average of the unclamped raw points.
    /// Never guardrailed, so two candidates that both floor at zero on a bad
    /// day stay distinguishable.
    pub total_raw: f64,
    /// Minimum day points in the window
    pub worst_day: u8,
    pub components: ComponentTotals,
    /// Static shelter rating the window was scored with
    pub shelter_rating: f64,
    /// The scored days, kept as the explain record
    pub days: Vec<ScoredDay>,
}

/// Slice a contiguous window of `days` calendar days starting at
/// `start_date` out of a scored sequence.
///
/// `None` when the start date is absent, any date is missing, the run is not
/// contiguous, or the sequence is too short — the site then has no data for
/// this window.
#[must_use]
pub fn slice_window(scored: &[ScoredDay], start_date: NaiveDate, days: u32) -> Option<Vec<ScoredDay>> {
    let start_index = scored
        .iter()
        .position(|d| d.weather.date == Some(start_date))?;

    let window = scored.get(start_index..start_index + days as usize)?;

    for (offset, day) in window.iter().enumerate() {
        let expected = start_date + chrono::Duration::days(offset as i64);
        if day.weather.date != Some(expected) {
            return None;
        }
    }

    Some(window.to_vec())
}

/// Aggregate a non-empty scored window into one weighted figure.
#[must_use]
pub fn aggregate_window(
    window: &[ScoredDay],
    shelter_rating: f64,
    config: &RelocationConfig,
) -> WindowAggregate {
    let weights: Vec<f64> = (0..window.len())
        .map(|i| config.weight_decay.powi(i as i32))
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    let weighted = |value: &dyn Fn(&ScoredDay) -> f64| -> f64 {
        window
            .iter()
            .zip(&weights)
            .map(|(day, w)| value(day) * w)
            .sum::<f64>()
            / weight_sum
    };

    let mut total = weighted(&|d| f64::from(d.points));
    let total_raw = weighted(&|d| d.points_raw);
    let worst_day = window.iter().map(|d| d.points).min().unwrap_or(0);

    let components = ComponentTotals {
        temp: weighted(&|d| f64::from(d.base_points)),
        wind: weighted(&|d| f64::from(d.wind_penalty)),
        rain: weighted(&|d| f64::from(d.rain_penalty)),
        gust: weighted(&|d| f64::from(d.gust_penalty)),
        rain_streak: weighted(&|d| f64::from(d.rain_streak_penalty)),
        shelter: weighted(&|d| f64::from(d.shelter_bonus)),
    };

    if config.use_worst_day_guardrail && f64::from(worst_day) < config.worst_day_min {
        total = total.min(f64::from(worst_day));
    }

    WindowAggregate {
        total,
        total_raw,
        worst_day,
        components,
        shelter_rating,
        days: window.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyWeather;
    use crate::scoring::{score_days_with_rain_streak, StreakOptions};

    fn scored_run(temps: &[f64]) -> Vec<ScoredDay> {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let days: Vec<DailyWeather> = temps
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                let mut day = DailyWeather::for_date(start + chrono::Duration::days(i as i64));
                day.max_temperature_c = Some(t);
                day
            })
            .collect();
        score_days_with_rain_streak(&days, &StreakOptions::default())
    }

    #[test]
    fn test_slice_window_happy_path() {
        let scored = scored_run(&[20.0; 7]);
        let start = NaiveDate::from_ymd_opt(2026, 7, 3).unwrap();
        let window = slice_window(&scored, start, 3).unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].weather.date, Some(start));
    }

    #[test]
    fn test_slice_window_missing_start_date() {
        let scored = scored_run(&[20.0; 5]);
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert!(slice_window(&scored, start, 3).is_none());
    }

    #[test]
    fn test_slice_window_too_short() {
        let scored = scored_run(&[20.0; 5]);
        let start = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        assert!(slice_window(&scored, start, 3).is_none());
    }

    #[test]
    fn test_slice_window_rejects_date_gap() {
        let mut scored = scored_run(&[20.0; 5]);
        // Punch a hole: shift day 2 forward by a day
        scored[2].weather.date = Some(NaiveDate::from_ymd_opt(2026, 7, 10).unwrap());
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert!(slice_window(&scored, start, 4).is_none());
    }

    #[test]
    fn test_weighted_average_favors_near_days() {
        // Day 0 excellent, day 1 and 2 poor: total sits above the plain mean
        let scored = scored_run(&[20.0, 2.0, 2.0]);
        let mut config = RelocationConfig::default();
        config.use_worst_day_guardrail = false;

        let aggregate = aggregate_window(&scored, 0.0, &config);
        let plain_mean =
            scored.iter().map(|d| f64::from(d.points)).sum::<f64>() / scored.len() as f64;
        assert!(aggregate.total > plain_mean);
    }

    #[test]
    fn test_guardrail_caps_total_but_not_raw() {
        let scored = scored_run(&[20.0, 20.0, 2.0]); // last day scores 0 points
        let config = RelocationConfig::default();

        let aggregate = aggregate_window(&scored, 0.0, &config);
        assert_eq!(aggregate.worst_day, 0);
        assert_eq!(aggregate.total, 0.0);
        assert!(aggregate.total_raw > 0.0);
    }

    #[test]
    fn test_guardrail_disabled() {
        let scored = scored_run(&[20.0, 20.0, 2.0]);
        let mut config = RelocationConfig::default();
        config.use_worst_day_guardrail = false;

        let aggregate = aggregate_window(&scored, 0.0, &config);
        assert!(aggregate.total > 0.0);
    }

    #[test]
    fn test_component_totals_track_penalties() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let days: Vec<DailyWeather> = (0..3)
            .map(|i| {
                let mut day = DailyWeather::for_date(start + chrono::Duration::days(i));
                day.max_temperature_c = Some(18.0);
                day.max_wind_speed_ms = Some(12.0);
                day.precipitation_mm = Some(5.0);
                day
            })
            .collect();
        let scored = score_days_with_rain_streak(&days, &StreakOptions::default());
        let aggregate = aggregate_window(&scored, 0.0, &RelocationConfig::default());

        assert!((aggregate.components.wind - 5.0).abs() < 1e-9);
        assert!((aggregate.components.rain - 5.0).abs() < 1e-9);
        assert!(aggregate.components.rain_streak > 0.0);
        assert_eq!(aggregate.components.shelter, 0.0);
    }
}
