//! Per-target aggregation of completed results.
mod summary;


pub use summary::{TargetSummary, summarize};
