use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Inclusive `[min, max]` span of status codes. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRange {
    min: u16,
    max: u16,
}

impl StatusRange {
    /// # Errors
    ///
    /// Returns an error when `min > max`.
    pub fn new(min: u16, max: u16) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::InvertedStatusRange {
                value: format!("{}-{}", min, max),
            });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(self) -> u16 {
        self.min
    }

    #[must_use]
    pub const fn max(self) -> u16 {
        self.max
    }

    #[must_use]
    pub const fn contains(self, status: u16) -> bool {
        status >= self.min && status <= self.max
    }
}

impl FromStr for StatusRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (min, max) =
            trimmed
                .split_once('-')
                .ok_or_else(|| ValidationError::InvalidStatusRange {
                    value: s.to_owned(),
                })?;
        let parse_bound = |bound: &str| {
            bound
                .trim()
                .parse::<u16>()
                .map_err(|err| ValidationError::InvalidStatusRangeNumber {
                    value: s.to_owned(),
                    source: err,
                })
        };
        let min = parse_bound(min)?;
        let max = parse_bound(max)?;
        if min > max {
            return Err(ValidationError::InvertedStatusRange {
                value: s.to_owned(),
            });
        }
        Ok(Self { min, max })
    }
}

impl fmt::Display for StatusRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
