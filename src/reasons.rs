//! Human-facing improvement reasons
//!
//! Turns component deltas between a candidate and the base site into ranked
//! reasons. Deltas come from the same weighted component totals the engine
//! ranks with, so reasons can never contradict the ranking.

use crate::config::RelocationConfig;
use crate::engine::aggregate::ComponentTotals;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The weather factor a reason is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReasonKind {
    Wind,
    Gust,
    Rain,
    RainStreak,
    Shelter,
    Temp,
}

impl ReasonKind {
    /// Fixed order used to break exact delta ties deterministically
    fn rank(self) -> u8 {
        match self {
            ReasonKind::Wind => 0,
            ReasonKind::Gust => 1,
            ReasonKind::Rain => 2,
            ReasonKind::RainStreak => 3,
            ReasonKind::Shelter => 4,
            ReasonKind::Temp => 5,
        }
    }
}

impl fmt::Display for ReasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonKind::Wind => write!(f, "wind"),
            ReasonKind::Gust => write!(f, "gust"),
            ReasonKind::Rain => write!(f, "rain"),
            ReasonKind::RainStreak => write!(f, "rainStreak"),
            ReasonKind::Shelter => write!(f, "shelter"),
            ReasonKind::Temp => write!(f, "temp"),
        }
    }
}

/// One reason a candidate beats the base, with the size of the improvement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reason {
    pub kind: ReasonKind,
    /// Improvement over the base in points, rounded to one decimal
    pub delta: f64,
}

impl Reason {
    /// Human-readable sentence fragment for presentation
    #[must_use]
    pub fn describe(&self) -> String {
        let what = match self.kind {
            ReasonKind::Wind => "less wind",
            ReasonKind::Gust => "fewer gusts",
            ReasonKind::Rain => "less rain",
            ReasonKind::RainStreak => "shorter wet spells",
            ReasonKind::Shelter => "better shelter",
            ReasonKind::Temp => "warmer days",
        };
        format!("{} (+{:.1})", what, self.delta)
    }
}

/// Build ranked improvement reasons from weighted component totals.
///
/// Penalty categories improve when the candidate carries less of them; base
/// points and shelter improve when the candidate carries more. Only
/// improvements of at least `reason_min_delta` survive, sorted by size and
/// truncated to `max_reasons`.
#[must_use]
pub fn build_reasons(
    base: &ComponentTotals,
    candidate: &ComponentTotals,
    config: &RelocationConfig,
) -> Vec<Reason> {
    let deltas = [
        (ReasonKind::Wind, base.wind - candidate.wind),
        (ReasonKind::Gust, base.gust - candidate.gust),
        (ReasonKind::Rain, base.rain - candidate.rain),
        (ReasonKind::RainStreak, base.rain_streak - candidate.rain_streak),
        (ReasonKind::Shelter, candidate.shelter - base.shelter),
        (ReasonKind::Temp, candidate.temp - base.temp),
    ];

    let mut reasons: Vec<Reason> = deltas
        .into_iter()
        .map(|(kind, delta)| Reason {
            kind,
            delta: round_one_decimal(delta),
        })
        .filter(|reason| reason.delta >= config.reason_min_delta)
        .collect();

    reasons.sort_by(|a, b| {
        b.delta
            .total_cmp(&a.delta)
            .then_with(|| a.kind.rank().cmp(&b.kind.rank()))
    });
    reasons.truncate(config.max_reasons);
    reasons
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
