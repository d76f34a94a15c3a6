//! Status acceptance rules: exact codes plus inclusive ranges.
mod range;


pub use range::StatusRange;

use tracing::warn;

/// Status code accepted when a target configures neither codes nor ranges.
pub const DEFAULT_ACCEPTED_STATUS: u16 = 200;

/// Decides which HTTP status codes count as healthy for a target.
///
/// A code is accepted when it is one of the exact codes or falls inside any
/// of the inclusive ranges. A policy built without any codes or ranges
/// accepts only `200`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptancePolicy {
    codes: Vec<u16>,
    ranges: Vec<StatusRange>,
}

impl AcceptancePolicy {
    #[must_use]
    pub fn new(codes: Vec<u16>, ranges: Vec<StatusRange>) -> Self {
        if codes.is_empty() && ranges.is_empty() {
            return Self::default();
        }
        Self { codes, ranges }
    }

    /// Builds a policy from raw config values.
    ///
    /// Range strings that do not parse as `<min>-<max>` are logged and
    /// skipped; the remaining ranges still apply.
    #[must_use]
    pub fn from_config(codes: &[u16], ranges: &[String]) -> Self {
        let parsed = ranges
            .iter()
            .filter_map(|raw| match raw.parse::<StatusRange>() {
                Ok(range) => Some(range),
                Err(err) => {
                    warn!("Ignoring status range '{}': {}", raw, err);
                    None
                }
            })
            .collect();
        Self::new(codes.to_vec(), parsed)
    }

    #[must_use]
    pub fn accepts(&self, status: u16) -> bool {
        self.codes.contains(&status) || self.ranges.iter().any(|range| range.contains(status))
    }

    #[must_use]
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    #[must_use]
    pub fn ranges(&self) -> &[StatusRange] {
        &self.ranges
    }
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            codes: vec![DEFAULT_ACCEPTED_STATUS],
            ranges: Vec::new(),
        }
    }
}
