//! Forecast retrieval seam
//!
//! The engine never fetches weather itself; callers inject a
//! [`ForecastProvider`]. Caching, retries and timeouts belong to the
//! provider — the engine treats a failed and a timed-out fetch identically.

use crate::models::{Coordinate, DailyWeather};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// External collaborator that retrieves a per-day weather sequence for a
/// coordinate. Each call may fail independently.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn fetch(&self, coordinate: &Coordinate) -> anyhow::Result<Vec<DailyWeather>>;
}

/// Deterministic in-memory provider keyed by coordinate, with failure
/// injection. The standard collaborator for tests and examples.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    sequences: HashMap<String, Vec<DailyWeather>>,
    failing: HashSet<String>,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a weather sequence for a coordinate
    pub fn insert(&mut self, coordinate: Coordinate, days: Vec<DailyWeather>) {
        self.sequences.insert(Self::key(&coordinate), days);
    }

    /// Make every fetch for this coordinate fail
    pub fn fail_at(&mut self, coordinate: Coordinate) {
        self.failing.insert(Self::key(&coordinate));
    }

    fn key(coordinate: &Coordinate) -> String {
        // Rounded to ~11 m so a site coordinate round-trips exactly
        format!("{:.4},{:.4}", coordinate.lat, coordinate.lon)
    }
}

#[async_trait]
impl ForecastProvider for InMemoryProvider {
    async fn fetch(&self, coordinate: &Coordinate) -> anyhow::Result<Vec<DailyWeather>> {
        let key = Self::key(coordinate);
        if self.failing.contains(&key) {
            anyhow::bail!("forecast service unavailable for {key}");
        }
        self.sequences
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no forecast for coordinate {key}"))
    }
}
