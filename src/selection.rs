//! Candidate selection by distance from a base site

use crate::geo;
use crate::models::Site;
use serde::{Deserialize, Serialize};

/// A catalog site paired with its distance from the base site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub site: Site,
    pub distance_km: f64,
}

/// Select relocation candidates from a site pool.
///
/// Excludes the base site by id and any pair whose distance is undefined
/// (non-finite coordinates), keeps sites within `radius_km`, sorts ascending
/// by distance and truncates to `limit`. Equal distances keep the pool's
/// input order; the engine breaks remaining ties by site id later.
#[must_use]
pub fn select_candidates(base: &Site, pool: &[Site], radius_km: f64, limit: usize) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = pool
        .iter()
        .filter(|site| site.id != base.id)
        .filter_map(|site| {
            geo::distance_km(&base.coordinate, &site.coordinate).map(|distance_km| Candidate {
                site: site.clone(),
                distance_km,
            })
        })
        .filter(|candidate| candidate.distance_km <= radius_km)
        .collect();

    // Stable sort preserves input order on exact distance ties
    candidates.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(limit);
    candidates
}
