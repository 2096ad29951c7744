//! Window aggregation and the relocation engine

pub mod aggregate;
pub mod relocation;

pub use aggregate::{aggregate_window, slice_window, ComponentTotals, WindowAggregate};
pub use relocation::{
    recommend, recommend_from_weather, RankedCandidate, RelocationRequest, RelocationResult,
    ScoredSite, Verdict,
};
