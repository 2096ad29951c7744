//! Daily condition scoring
//!
//! [`day`] turns one day's raw weather into a bounded score with a component
//! breakdown; [`streak`] extends it across a day sequence with the
//! consecutive-wet-day penalty.

pub mod day;
pub mod streak;

pub use day::{score_day, QualityClass, ScoredDay, Season};
pub use streak::{score_days_with_rain_streak, StreakOptions};
