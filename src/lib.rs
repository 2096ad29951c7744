//! `CampScout` - Camping condition scoring and site relocation advice
//!
//! This library scores outdoor-camping conditions per site per day from raw
//! weather observations, aggregates scores over multi-day windows, and
//! recommends whether a camper should relocate to a better nearby site
//! within a travel radius.

pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod geo;
pub mod leaderboard;
pub mod models;
pub mod reasons;
pub mod scoring;
pub mod selection;
pub mod wind;

// Re-export core types for public API
pub use config::{LeaderboardConfig, RelocationConfig};
pub use engine::{
    recommend, recommend_from_weather, RankedCandidate, RelocationRequest, RelocationResult,
    ScoredSite, Verdict, WindowAggregate,
};
pub use error::CampScoutError;
pub use forecast::{ForecastProvider, InMemoryProvider};
pub use leaderboard::Leaderboard;
pub use models::{Coordinate, DailyWeather, Site};
pub use reasons::{Reason, ReasonKind};
pub use scoring::{score_day, score_days_with_rain_streak, QualityClass, ScoredDay, Season};
pub use wind::{weekly_shelter_score, ShelterLabel, WeeklyShelter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CampScoutError>;
