//! Strongly-typed migration unit name.
//!
//! Names are descriptive only (versions carry identity), but they end up in
//! file names and ledger rows, so they are restricted to a filesystem- and
//! SQL-safe subset: ASCII alphanumerics and underscores, non-empty.

use serde::{Deserialize, Serialize};

/// Descriptive name of a migration unit (the `add_index` in
/// `v0003_add_index.sql`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnitName(String);

impl UnitName {
    /// Try to create a name, returning `None` when the input is empty or
    /// contains characters outside `[a-z0-9_]` (lowercase enforced so file
    /// names sort identically on case-insensitive filesystems).
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let s = name.into();
        if s.is_empty() {
            return None;
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        {
            return None;
        }
        Some(Self(s))
    }

    /// Create a name, panicking on invalid input.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        Self::try_new(s.clone())
            .unwrap_or_else(|| panic!("invalid unit name '{s}': expected [a-z0-9_]+"))
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for UnitName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UnitName::try_new(s)
            .ok_or_else(|| serde::de::Error::custom("UnitName must match [a-z0-9_]+"))
    }
}

impl std::fmt::Display for UnitName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for UnitName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for UnitName {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        UnitName::try_new(s).ok_or("UnitName must match [a-z0-9_]+")
    }
}

impl PartialEq<str> for UnitName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for UnitName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
