//! Great-circle distance between coordinates
//!
//! Used only for radius filtering. Distance is undefined when either side
//! carries a non-finite latitude or longitude; callers must exclude such
//! pairs rather than treat them as zero kilometres.

use crate::models::Coordinate;

/// Haversine distance in kilometres (Earth radius 6371 km).
///
/// Returns `None` when any coordinate component is non-finite. Symmetric in
/// its arguments.
#[must_use]
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> Option<f64> {
    if !a.lat.is_finite() || !a.lon.is_finite() || !b.lat.is_finite() || !b.lon.is_finite() {
        return None;
    }

    let distance = haversine::distance(
        haversine::Location {
            latitude: a.lat,
            longitude: a.lon,
        },
        haversine::Location {
            latitude: b.lat,
            longitude: b.lon,
        },
        haversine::Units::Kilometers,
    );
    Some(distance)
}
