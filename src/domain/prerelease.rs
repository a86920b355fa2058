//! Prerelease suffix handling (`-label.counter`)
//!
//! The counter is kept exactly as it was written so that a stored version
//! round-trips even when the counter is not a number; arithmetic goes
//! through [`PreRelease::counter_value`].

use std::fmt;

/// Prerelease suffix such as `dev.3` or `alpha.1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreRelease {
    /// Label identifying the prerelease series (e.g. `dev`, `beta`)
    pub label: String,
    /// Counter token as written; `"0"` when the segment had none
    pub counter: String,
}

impl PreRelease {
    /// Create a prerelease with a numeric counter
    pub fn numbered(label: impl Into<String>, counter: u64) -> Self {
        PreRelease {
            label: label.into(),
            counter: counter.to_string(),
        }
    }

    /// Parse the segment following the first `-` of a version string
    ///
    /// `dev.4` -> label `dev`, counter `4`; `dev` -> label `dev`, counter `0`.
    /// Everything after the first `.` is the counter token.
    pub fn parse(segment: &str) -> Self {
        match segment.split_once('.') {
            Some((label, counter)) => PreRelease {
                label: label.to_string(),
                counter: counter.to_string(),
            },
            None => PreRelease {
                label: segment.to_string(),
                counter: "0".to_string(),
            },
        }
    }

    /// Numeric value of the counter, if it is a valid integer
    pub fn counter_value(&self) -> Option<u64> {
        self.counter.parse::<u64>().ok()
    }

    /// Whether a counter token is present at all
    pub fn has_counter(&self) -> bool {
        !self.counter.is_empty()
    }

    /// Counter for the next build in this series.
    ///
    /// A counter that is not a valid integer restarts the series at 1.
    pub fn next_counter(&self) -> u64 {
        self.counter_value()
            .map(|n| n.saturating_add(1))
            .unwrap_or(1)
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.label, self.counter)
    }
}
