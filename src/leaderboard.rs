//! Leaderboard prioritizer
//!
//! Rate-limited, priority-ordered scoring of a full site catalog for a
//! "top N" view. The selected site scores first, then the sites nearest the
//! user, then the rest — a paced synchronous first wave followed by a
//! background trickle through a fixed pool of workers pulling one shared
//! queue. Each site is fetched at most once per run, and cancellation halts
//! further scheduling without touching scores already written.

use crate::config::{LeaderboardConfig, RelocationConfig};
use crate::engine::aggregate::{aggregate_window, slice_window, WindowAggregate};
use crate::error::CampScoutError;
use crate::forecast::ForecastProvider;
use crate::geo;
use crate::models::{Coordinate, Site};
use crate::scoring::{score_days_with_rain_streak, StreakOptions};
use crate::Result;
use chrono::NaiveDate;
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Order the catalog for scoring: the selected site first, then the rest by
/// distance to the user, or in catalog order when no user location is known.
/// Sites with an undefined distance to the user sort last.
#[must_use]
pub fn priority_order(
    catalog: &[Site],
    selected_site_id: &str,
    user: Option<Coordinate>,
) -> Vec<Site> {
    let mut order = Vec::with_capacity(catalog.len());
    if let Some(selected) = catalog.iter().find(|s| s.id == selected_site_id) {
        order.push(selected.clone());
    }

    let mut remainder: Vec<Site> = catalog
        .iter()
        .filter(|s| s.id != selected_site_id)
        .cloned()
        .collect();

    if let Some(user) = user {
        remainder.sort_by(|a, b| {
            let da = geo::distance_km(&user, &a.coordinate).unwrap_or(f64::INFINITY);
            let db = geo::distance_km(&user, &b.coordinate).unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        });
    }

    order.extend(remainder);
    order
}

/// One leaderboard run: an incrementally-filled site-id → aggregate map plus
/// a cancellation flag. Clones share the same state, so a presentation layer
/// can hold one clone for polling and cancellation while `run` drives the
/// other.
#[derive(Clone, Default)]
pub struct Leaderboard {
    results: Arc<RwLock<HashMap<String, WindowAggregate>>>,
    cancelled: Arc<AtomicBool>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Halt further scheduling. Scores already written stay available.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Number of sites scored so far
    #[must_use]
    pub fn scored_count(&self) -> usize {
        self.results.read().len()
    }

    /// Snapshot of the current site-id → aggregate map
    #[must_use]
    pub fn results(&self) -> HashMap<String, WindowAggregate> {
        self.results.read().clone()
    }

    /// Aggregate for one site, if scored
    #[must_use]
    pub fn get(&self, site_id: &str) -> Option<WindowAggregate> {
        self.results.read().get(site_id).cloned()
    }

    /// Score the catalog in priority order.
    ///
    /// The first wave covers the first `first_wave_len` entries
    /// sequentially with a small delay between requests; the remainder
    /// trickles through `workers` concurrent workers with a per-item delay,
    /// stopping early once the enough-scored threshold for this run is met.
    #[allow(clippy::too_many_arguments)]
    pub async fn run(
        &self,
        provider: &dyn ForecastProvider,
        catalog: &[Site],
        selected_site_id: &str,
        user: Option<Coordinate>,
        start_date: NaiveDate,
        days: u32,
        scoring: &RelocationConfig,
        config: &LeaderboardConfig,
    ) -> Result<()> {
        scoring.validate()?;
        config.validate()?;
        if days < 1 {
            return Err(CampScoutError::validation("days must be at least 1"));
        }

        let order = priority_order(catalog, selected_site_id, user);
        let enough = if user.is_some() {
            config.enough_scored_with_location
        } else {
            config.enough_scored_without_location
        };

        let first_wave_len = config.first_wave_len.min(order.len());
        for site in &order[..first_wave_len] {
            if self.is_cancelled() {
                debug!("leaderboard cancelled during first wave");
                return Ok(());
            }
            self.score_one(provider, site, start_date, days, scoring).await;
            tokio::time::sleep(Duration::from_millis(config.first_wave_delay_ms)).await;
        }

        let queue: Mutex<VecDeque<Site>> =
            Mutex::new(order[first_wave_len..].iter().cloned().collect());

        // Fixed worker pool over one shared queue: each site is popped by
        // exactly one worker, so there is at most one in-flight request per
        // site and one writer per result key.
        let queue = &queue;
        let workers = (0..config.workers).map(|worker| async move {
            loop {
                if self.is_cancelled() {
                    debug!(worker, "leaderboard worker stopping: cancelled");
                    break;
                }
                if self.scored_count() >= enough {
                    debug!(worker, "leaderboard worker stopping: enough sites scored");
                    break;
                }
                let Some(site) = queue.lock().pop_front() else {
                    break;
                };
                self.score_one(provider, &site, start_date, days, scoring).await;
                tokio::time::sleep(Duration::from_millis(config.trickle_delay_ms)).await;
            }
        });
        join_all(workers).await;

        debug!(scored = self.scored_count(), "leaderboard run finished");
        Ok(())
    }

    /// Fetch and score one site; failures and uncovered windows are skipped.
    async fn score_one(
        &self,
        provider: &dyn ForecastProvider,
        site: &Site,
        start_date: NaiveDate,
        days: u32,
        scoring: &RelocationConfig,
    ) {
        if self.results.read().contains_key(&site.id) {
            return;
        }

        let weather = match provider.fetch(&site.coordinate).await {
            Ok(weather) => weather,
            Err(e) => {
                warn!(site = %site.id, "leaderboard forecast fetch failed: {e}");
                return;
            }
        };

        let opts = StreakOptions {
            wet_threshold_mm: scoring.wet_threshold_mm,
            shelter_rating: site.shelter_rating,
        };
        let scored = score_days_with_rain_streak(&weather, &opts);
        let Some(window) = slice_window(&scored, start_date, days) else {
            debug!(site = %site.id, "leaderboard: no data for requested window");
            return;
        };

        let aggregate = aggregate_window(&window, site.shelter_rating, scoring);
        self.results.write().insert(site.id.clone(), aggregate);
    }
}
