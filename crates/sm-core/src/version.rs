//! Migration version identifiers.
//!
//! A [`Version`] is a plain u64 so both sequence numbers (1, 2, 3, ...) and
//! timestamp-style identifiers (20260806120000) order correctly. Versions are
//! the sole identity of a migration unit; the name is descriptive only.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Monotonically ordered migration version identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Wrap a raw version number.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw version number.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Parse the digit run of a version identifier (e.g. `"003"` -> 3).
    ///
    /// Leading zeros are accepted and ignored; the empty string and
    /// non-digit input are rejected.
    pub fn parse(value: &str) -> CoreResult<Self> {
        if value.is_empty() {
            return Err(CoreError::InvalidVersion {
                value: value.to_string(),
                reason: "version digits are missing".to_string(),
            });
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::InvalidVersion {
                value: value.to_string(),
                reason: "version must be decimal digits".to_string(),
            });
        }
        value
            .parse::<u64>()
            .map(Self)
            .map_err(|e| CoreError::InvalidVersion {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    /// Format the version as a zero-padded file prefix (e.g. `v0003`).
    ///
    /// Versions wider than four digits print at their natural width.
    pub fn file_prefix(&self) -> String {
        format!("v{:04}", self.0)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
