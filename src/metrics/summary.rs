use std::time::Duration;

use crate::http::EndpointResult;

/// Counts and mean latency over one target's completed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub avg_duration: Duration,
}

impl TargetSummary {
    #[must_use]
    pub fn avg_duration_secs(&self) -> f64 {
        self.avg_duration.as_secs_f64()
    }

    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Aggregates a completed result set. An empty set yields all zeros.
#[must_use]
pub fn summarize(results: &[EndpointResult]) -> TargetSummary {
    let total = results.len();
    let successful = results.iter().filter(|result| result.success).count();
    let total_nanos = results
        .iter()
        .fold(0u128, |sum, result| sum.saturating_add(result.duration.as_nanos()));
    let avg_nanos = u128::try_from(total)
        .ok()
        .and_then(|count| total_nanos.checked_div(count))
        .unwrap_or(0);

    TargetSummary {
        total,
        successful,
        failed: total.saturating_sub(successful),
        avg_duration: Duration::from_nanos(u64::try_from(avg_nanos).unwrap_or(u64::MAX)),
    }
}
