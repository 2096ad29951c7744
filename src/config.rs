//! Configuration for the relocation engine and leaderboard scorer
//!
//! Plain serde structs with per-field defaults and validation. Nothing here
//! is read from disk; callers construct or deserialize a config and hand it
//! to the engine per request.

use crate::error::CampScoutError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Tunable knobs for scoring, window aggregation, ranking and verdicts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationConfig {
    /// Precipitation at or above this counts as a wet day (mm)
    #[serde(default = "default_wet_threshold_mm")]
    pub wet_threshold_mm: f64,
    /// Per-day weight decay; nearer days weigh more
    #[serde(default = "default_weight_decay")]
    pub weight_decay: f64,
    /// Cap the display total at the worst day when it dips below the minimum
    #[serde(default = "default_use_worst_day_guardrail")]
    pub use_worst_day_guardrail: bool,
    /// Worst-day points below this trigger the guardrail
    #[serde(default = "default_worst_day_min")]
    pub worst_day_min: f64,
    /// Raw-score delta at which the verdict becomes MOVE
    #[serde(default = "default_min_delta_to_move")]
    pub min_delta_to_move: f64,
    /// Raw-score delta at which the verdict becomes CONSIDER
    #[serde(default = "default_min_delta_to_consider")]
    pub min_delta_to_consider: f64,
    /// Minimum per-component improvement to emit a reason
    #[serde(default = "default_reason_min_delta")]
    pub reason_min_delta: f64,
    /// Maximum number of reasons per candidate
    #[serde(default = "default_max_reasons")]
    pub max_reasons: usize,
}

/// Pacing and stopping rules for the leaderboard prioritizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Entries scored synchronously before the background trickle starts:
    /// the selected site plus the nearest eight
    #[serde(default = "default_first_wave_len")]
    pub first_wave_len: usize,
    /// Delay between first-wave requests (ms)
    #[serde(default = "default_first_wave_delay_ms")]
    pub first_wave_delay_ms: u64,
    /// Delay after each background request (ms)
    #[serde(default = "default_trickle_delay_ms")]
    pub trickle_delay_ms: u64,
    /// Fixed number of background workers
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Stop scheduling once this many sites are scored and a user location is known
    #[serde(default = "default_enough_with_location")]
    pub enough_scored_with_location: usize,
    /// Stop threshold without a user location
    #[serde(default = "default_enough_without_location")]
    pub enough_scored_without_location: usize,
}

fn default_wet_threshold_mm() -> f64 {
    3.0
}

fn default_weight_decay() -> f64 {
    0.85
}

fn default_use_worst_day_guardrail() -> bool {
    true
}

fn default_worst_day_min() -> f64 {
    2.0
}

fn default_min_delta_to_move() -> f64 {
    2.0
}

fn default_min_delta_to_consider() -> f64 {
    1.0
}

fn default_reason_min_delta() -> f64 {
    1.0
}

fn default_max_reasons() -> usize {
    4
}

fn default_first_wave_len() -> usize {
    9
}

fn default_first_wave_delay_ms() -> u64 {
    150
}

fn default_trickle_delay_ms() -> u64 {
    400
}

fn default_workers() -> usize {
    2
}

fn default_enough_with_location() -> usize {
    30
}

fn default_enough_without_location() -> usize {
    12
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            wet_threshold_mm: default_wet_threshold_mm(),
            weight_decay: default_weight_decay(),
            use_worst_day_guardrail: default_use_worst_day_guardrail(),
            worst_day_min: default_worst_day_min(),
            min_delta_to_move: default_min_delta_to_move(),
            min_delta_to_consider: default_min_delta_to_consider(),
            reason_min_delta: default_reason_min_delta(),
            max_reasons: default_max_reasons(),
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            first_wave_len: default_first_wave_len(),
            first_wave_delay_ms: default_first_wave_delay_ms(),
            trickle_delay_ms: default_trickle_delay_ms(),
            workers: default_workers(),
            enough_scored_with_location: default_enough_with_location(),
            enough_scored_without_location: default_enough_without_location(),
        }
    }
}

impl RelocationConfig {
    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !(self.wet_threshold_mm.is_finite() && self.wet_threshold_mm >= 0.0) {
            return Err(CampScoutError::config(
                "Wet-day threshold must be a non-negative number of millimetres",
            ));
        }

        if !(self.weight_decay > 0.0 && self.weight_decay <= 1.0) {
            return Err(CampScoutError::config(
                "Weight decay must be within (0, 1]",
            ));
        }

        if !(0.0..=10.0).contains(&self.worst_day_min) {
            return Err(CampScoutError::config(
                "Worst-day minimum must be within the 0..10 point range",
            ));
        }

        if self.min_delta_to_consider > self.min_delta_to_move {
            return Err(CampScoutError::config(
                "CONSIDER threshold cannot exceed the MOVE threshold",
            ));
        }

        if !(self.reason_min_delta.is_finite() && self.reason_min_delta >= 0.0) {
            return Err(CampScoutError::config(
                "Reason threshold must be a non-negative number",
            ));
        }

        Ok(())
    }
}

impl LeaderboardConfig {
    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(CampScoutError::config(
                "Leaderboard needs at least one background worker",
            ));
        }

        if self.enough_scored_without_location > self.enough_scored_with_location {
            return Err(CampScoutError::config(
                "The without-location stop threshold cannot exceed the with-location one",
            ));
        }

        Ok(())
    }
}
