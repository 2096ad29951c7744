//! Camp site data types
//!
//! A site is a value object built fresh per request from caller-supplied
//! catalog data. The shelter rating is a static wind-protection attribute
//! from site metadata, distinct from the dynamically computed weekly shelter
//! score in [`crate::wind`].

use serde::{Deserialize, Deserializer, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A camp site from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Unique, stable identifier
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    /// Static wind-protection rating, 0..10. Catalog sources sometimes ship
    /// this as a numeric string, so deserialization coerces and clamps.
    #[serde(default, deserialize_with = "deserialize_shelter_rating")]
    pub shelter_rating: f64,
}

impl Site {
    /// Create a site with a clamped shelter rating
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinate: Coordinate,
        shelter_rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            shelter_rating: clamp_shelter_rating(shelter_rating),
        }
    }
}

fn clamp_shelter_rating(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 10.0)
    } else {
        0.0
    }
}

fn deserialize_shelter_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(f64),
        Text(String),
    }

    let raw = Option::<RawRating>::deserialize(deserializer)?;
    let value = match raw {
        None => 0.0,
        Some(RawRating::Number(n)) => n,
        Some(RawRating::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
    };
    Ok(clamp_shelter_rating(value))
}
