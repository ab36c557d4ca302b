//! Scoreboard aggregation.
//!
//! Folds an unordered bag of normalized detections from one frame into a
//! single `ScoreboardRecord` and renders it for people.

pub mod aggregate;
pub mod record;
pub mod report;

pub use aggregate::{aggregate, Aggregator, MidpointSplit, ScoreSlotStrategy};
pub use record::ScoreboardRecord;
pub use report::render_report;
