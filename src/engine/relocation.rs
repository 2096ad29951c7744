//! Relocation engine
//!
//! Scores the base site and nearby candidates over a shared day-window,
//! ranks the candidates deterministically, and emits a STAY / CONSIDER /
//! MOVE verdict with per-candidate improvement reasons.

use crate::config::RelocationConfig;
use crate::engine::aggregate::{aggregate_window, slice_window, WindowAggregate};
use crate::error::CampScoutError;
use crate::forecast::ForecastProvider;
use crate::models::{DailyWeather, Site};
use crate::reasons::{build_reasons, Reason};
use crate::scoring::{score_days_with_rain_streak, StreakOptions};
use crate::selection::select_candidates;
use crate::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

/// One relocation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationRequest {
    pub base_site_id: String,
    /// Straight-line search radius around the base site
    pub radius_km: f64,
    /// Window length in calendar days
    pub days: u32,
    pub start_date: chrono::NaiveDate,
    /// Maximum number of candidates to preselect and score
    pub limit: usize,
}

/// The engine's recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Stay,
    Consider,
    Move,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Stay => write!(f, "STAY"),
            Verdict::Consider => write!(f, "CONSIDER"),
            Verdict::Move => write!(f, "MOVE"),
        }
    }
}

/// A site together with its window aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSite {
    pub site: Site,
    pub aggregate: WindowAggregate,
}

/// One ranked alternative to the base site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub site: Site,
    pub distance_km: f64,
    pub aggregate: WindowAggregate,
    /// Raw-score improvement over the base site
    pub delta_vs_base: f64,
    pub reasons: Vec<Reason>,
}

/// Full result of a relocation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocationResult {
    pub verdict: Verdict,
    pub base: ScoredSite,
    pub ranked: Vec<RankedCandidate>,
    /// Candidates inside the radius before scoring
    pub candidates_preselected: usize,
    /// Candidates that had usable weather for the window
    pub candidates_scored: usize,
}

impl RelocationResult {
    /// The best-scoring alternative, if any candidate was scored
    #[must_use]
    pub fn best(&self) -> Option<&RankedCandidate> {
        self.ranked.first()
    }
}

/// Score one site's weather sequence over the requested window.
///
/// `None` when the sequence does not cover the window — the site has no
/// data and is excluded.
fn score_site_window(
    weather: &[DailyWeather],
    shelter_rating: f64,
    request: &RelocationRequest,
    config: &RelocationConfig,
) -> Option<WindowAggregate> {
    let opts = StreakOptions {
        wet_threshold_mm: config.wet_threshold_mm,
        shelter_rating,
    };
    let scored = score_days_with_rain_streak(weather, &opts);
    let window = slice_window(&scored, request.start_date, request.days)?;
    Some(aggregate_window(&window, shelter_rating, config))
}

fn validate_request(request: &RelocationRequest) -> Result<()> {
    if !(request.radius_km.is_finite() && request.radius_km > 0.0) {
        return Err(CampScoutError::validation(
            "radius_km must be a positive number",
        ));
    }
    if request.days < 1 {
        return Err(CampScoutError::validation("days must be at least 1"));
    }
    Ok(())
}

/// Run the relocation pipeline over caller-supplied weather sequences keyed
/// by site id. Pure and deterministic; sites without usable weather are
/// excluded, never fatal — except the base site, whose absence of data is a
/// contract error.
pub fn recommend_from_weather(
    catalog: &[Site],
    weather_by_site: &HashMap<String, Vec<DailyWeather>>,
    request: &RelocationRequest,
    config: &RelocationConfig,
) -> Result<RelocationResult> {
    config.validate()?;
    validate_request(request)?;

    let base_site = catalog
        .iter()
        .find(|s| s.id == request.base_site_id)
        .ok_or_else(|| CampScoutError::BaseSiteNotFound {
            site_id: request.base_site_id.clone(),
        })?;

    let base_aggregate = weather_by_site
        .get(&base_site.id)
        .and_then(|weather| {
            score_site_window(weather, base_site.shelter_rating, request, config)
        })
        .ok_or_else(|| CampScoutError::BaseWindowUncovered {
            site_id: base_site.id.clone(),
        })?;

    let preselected = select_candidates(base_site, catalog, request.radius_km, request.limit);
    let candidates_preselected = preselected.len();
    debug!(
        base = %base_site.id,
        preselected = candidates_preselected,
        "preselected candidates within {} km",
        request.radius_km
    );

    let mut ranked: Vec<RankedCandidate> = preselected
        .into_iter()
        .filter_map(|candidate| {
            let weather = weather_by_site.get(&candidate.site.id)?;
            let mut aggregate = score_site_window(
                weather,
                candidate.site.shelter_rating,
                request,
                config,
            )?;

            // Inject the base site's same-date points into the candidate's
            // day records for direct day-by-day comparison.
            for day in &mut aggregate.days {
                day.base_site_points = base_aggregate
                    .days
                    .iter()
                    .find(|base_day| base_day.weather.date == day.weather.date)
                    .map(|base_day| base_day.points);
            }

            let delta_vs_base = aggregate.total_raw - base_aggregate.total_raw;
            let reasons = build_reasons(&base_aggregate.components, &aggregate.components, config);

            Some(RankedCandidate {
                site: candidate.site,
                distance_km: candidate.distance_km,
                aggregate,
                delta_vs_base,
                reasons,
            })
        })
        .collect();

    let candidates_scored = ranked.len();
    if candidates_scored < candidates_preselected {
        debug!(
            excluded = candidates_preselected - candidates_scored,
            "candidates excluded for missing window data"
        );
    }

    // Full determinism even on exact ties: raw score, display score,
    // distance, then site id.
    ranked.sort_by(|a, b| {
        b.aggregate
            .total_raw
            .total_cmp(&a.aggregate.total_raw)
            .then_with(|| b.aggregate.total.total_cmp(&a.aggregate.total))
            .then_with(|| a.distance_km.total_cmp(&b.distance_km))
            .then_with(|| a.site.id.cmp(&b.site.id))
    });

    let best_raw = ranked
        .first()
        .map_or(base_aggregate.total_raw, |c| c.aggregate.total_raw);
    let delta = best_raw - base_aggregate.total_raw;
    let verdict = if delta >= config.min_delta_to_move {
        Verdict::Move
    } else if delta >= config.min_delta_to_consider {
        Verdict::Consider
    } else {
        Verdict::Stay
    };

    info!(
        base = %base_site.id,
        %verdict,
        delta = format!("{delta:.2}"),
        scored = candidates_scored,
        "relocation verdict"
    );

    Ok(RelocationResult {
        verdict,
        base: ScoredSite {
            site: base_site.clone(),
            aggregate: base_aggregate,
        },
        ranked,
        candidates_preselected,
        candidates_scored,
    })
}

/// Run the relocation pipeline, fetching weather through the injected
/// forecast provider.
///
/// Candidate fetches run concurrently with all-settled semantics: an
/// individual failure shrinks the scored set without aborting the request.
/// A failed base fetch is fatal — no recommendation without a base
/// comparison.
pub async fn recommend(
    provider: &dyn ForecastProvider,
    catalog: &[Site],
    request: &RelocationRequest,
    config: &RelocationConfig,
) -> Result<RelocationResult> {
    config.validate()?;
    validate_request(request)?;

    let base_site = catalog
        .iter()
        .find(|s| s.id == request.base_site_id)
        .ok_or_else(|| CampScoutError::BaseSiteNotFound {
            site_id: request.base_site_id.clone(),
        })?;

    let base_weather = provider
        .fetch(&base_site.coordinate)
        .await
        .map_err(|e| CampScoutError::BaseForecastMissing {
            site_id: base_site.id.clone(),
            message: e.to_string(),
        })?;

    let candidates = select_candidates(base_site, catalog, request.radius_km, request.limit);

    let fetches = candidates
        .iter()
        .map(|candidate| provider.fetch(&candidate.site.coordinate));
    let outcomes = join_all(fetches).await;

    let mut weather_by_site: HashMap<String, Vec<DailyWeather>> = HashMap::new();
    weather_by_site.insert(base_site.id.clone(), base_weather);
    for (candidate, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            Ok(weather) => {
                weather_by_site.insert(candidate.site.id.clone(), weather);
            }
            Err(e) => {
                warn!(site = %candidate.site.id, "candidate forecast fetch failed: {e}");
            }
        }
    }

    recommend_from_weather(catalog, &weather_by_site, request, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use chrono::NaiveDate;

    fn site(id: &str, lat: f64, lon: f64, shelter: f64) -> Site {
        Site::new(id, id.to_uppercase(), Coordinate::new(lat, lon), shelter)
    }

    fn fair_weather_days(start: NaiveDate, count: usize) -> Vec<DailyWeather> {
        (0..count)
            .map(|i| {
                let mut day = DailyWeather::for_date(start + chrono::Duration::days(i as i64));
                day.max_temperature_c = Some(18.0);
                day.max_wind_speed_ms = Some(3.0);
                day.max_wind_gust_ms = Some(4.0);
                day.precipitation_mm = Some(0.0);
                day
            })
            .collect()
    }

    fn default_request(start: NaiveDate) -> RelocationRequest {
        RelocationRequest {
            base_site_id: "base".to_string(),
            radius_km: 50.0,
            days: 3,
            start_date: start,
            limit: 10,
        }
    }

    #[test]
    fn test_base_site_not_found() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let catalog = vec![site("other", 60.0, 10.0, 0.0)];
        let result = recommend_from_weather(
            &catalog,
            &HashMap::new(),
            &default_request(start),
            &RelocationConfig::default(),
        );
        assert!(matches!(
            result,
            Err(CampScoutError::BaseSiteNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_radius_and_days_are_caller_errors() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let catalog = vec![site("base", 60.0, 10.0, 0.0)];
        let weather: HashMap<String, Vec<DailyWeather>> =
            HashMap::from([("base".to_string(), fair_weather_days(start, 5))]);

        let mut request = default_request(start);
        request.radius_km = 0.0;
        assert!(matches!(
            recommend_from_weather(&catalog, &weather, &request, &RelocationConfig::default()),
            Err(CampScoutError::Validation { .. })
        ));

        let mut request = default_request(start);
        request.days = 0;
        assert!(matches!(
            recommend_from_weather(&catalog, &weather, &request, &RelocationConfig::default()),
            Err(CampScoutError::Validation { .. })
        ));
    }

    #[test]
    fn test_base_without_window_coverage_is_fatal() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let catalog = vec![site("base", 60.0, 10.0, 0.0)];
        // Sequence starts after the requested window
        let late = fair_weather_days(start + chrono::Duration::days(10), 5);
        let weather = HashMap::from([("base".to_string(), late)]);

        let result = recommend_from_weather(
            &catalog,
            &weather,
            &default_request(start),
            &RelocationConfig::default(),
        );
        assert!(matches!(
            result,
            Err(CampScoutError::BaseWindowUncovered { .. })
        ));
    }

    #[test]
    fn test_result_with_empty_ranked_list() {
        // Candidates without data are excluded, not fatal
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let catalog = vec![
            site("base", 60.0, 10.0, 0.0),
            site("silent", 60.05, 10.0, 0.0),
        ];
        let weather = HashMap::from([("base".to_string(), fair_weather_days(start, 5))]);

        let result = recommend_from_weather(
            &catalog,
            &weather,
            &default_request(start),
            &RelocationConfig::default(),
        )
        .unwrap();

        assert_eq!(result.verdict, Verdict::Stay);
        assert!(result.ranked.is_empty());
        assert_eq!(result.candidates_preselected, 1);
        assert_eq!(result.candidates_scored, 0);
    }

    #[test]
    fn test_exact_ties_break_by_site_id() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        // Two candidates at the same distance with identical weather
        let catalog = vec![
            site("base", 60.0, 10.0, 0.0),
            site("zeta", 60.1, 10.0, 0.0),
            site("alpha", 60.1, 10.0, 0.0),
        ];
        let weather = HashMap::from([
            ("base".to_string(), fair_weather_days(start, 5)),
            ("zeta".to_string(), fair_weather_days(start, 5)),
            ("alpha".to_string(), fair_weather_days(start, 5)),
        ]);

        let result = recommend_from_weather(
            &catalog,
            &weather,
            &default_request(start),
            &RelocationConfig::default(),
        )
        .unwrap();

        let ids: Vec<&str> = result.ranked.iter().map(|c| c.site.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);

        // Identical input always produces identical order
        let again = recommend_from_weather(
            &catalog,
            &weather,
            &default_request(start),
            &RelocationConfig::default(),
        )
        .unwrap();
        let ids_again: Vec<&str> = again.ranked.iter().map(|c| c.site.id.as_str()).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn test_base_points_injected_into_candidate_days() {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let catalog = vec![site("base", 60.0, 10.0, 0.0), site("cand", 60.05, 10.0, 0.0)];
        let weather = HashMap::from([
            ("base".to_string(), fair_weather_days(start, 5)),
            ("cand".to_string(), fair_weather_days(start, 5)),
        ]);

        let result = recommend_from_weather(
            &catalog,
            &weather,
            &default_request(start),
            &RelocationConfig::default(),
        )
        .unwrap();

        let candidate = &result.ranked[0];
        for (day, base_day) in candidate.aggregate.days.iter().zip(&result.base.aggregate.days) {
            assert_eq!(day.base_site_points, Some(base_day.points));
        }
        // Base days carry no injection
        assert!(result.base.aggregate.days.iter().all(|d| d.base_site_points.is_none()));
    }

    #[tokio::test]
    async fn test_async_candidate_failure_is_non_fatal() {
        use crate::forecast::InMemoryProvider;

        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let base = site("base", 60.0, 10.0, 0.0);
        let good = site("good", 60.05, 10.0, 0.0);
        let broken = site("broken", 60.1, 10.0, 0.0);
        let catalog = vec![base.clone(), good.clone(), broken.clone()];

        let mut provider = InMemoryProvider::new();
        provider.insert(base.coordinate, fair_weather_days(start, 5));
        provider.insert(good.coordinate, fair_weather_days(start, 5));
        provider.fail_at(broken.coordinate);

        let result = recommend(
            &provider,
            &catalog,
            &default_request(start),
            &RelocationConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(result.candidates_preselected, 2);
        assert_eq!(result.candidates_scored, 1);
        assert_eq!(result.ranked[0].site.id, "good");
    }

    #[tokio::test]
    async fn test_async_base_failure_is_fatal() {
        use crate::forecast::InMemoryProvider;

        let start = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let base = site("base", 60.0, 10.0, 0.0);
        let other = site("other", 60.05, 10.0, 0.0);
        let catalog = vec![base.clone(), other.clone()];

        let mut provider = InMemoryProvider::new();
        provider.fail_at(base.coordinate);
        provider.insert(other.coordinate, fair_weather_days(start, 5));

        let result = recommend(
            &provider,
            &catalog,
            &default_request(start),
            &RelocationConfig::default(),
        )
        .await;

        match result {
            Err(CampScoutError::BaseForecastMissing { site_id, .. }) => {
                assert_eq!(site_id, "base");
            }
            other => panic!("expected BaseForecastMissing, got {other:?}"),
        }
    }
}
