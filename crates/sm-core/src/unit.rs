//! The migration unit: one versioned, atomic batch of schema statements.

use crate::unit_name::UnitName;
use crate::version::Version;
use std::path::PathBuf;

/// A single migration unit, parsed and ready to execute.
///
/// Units are immutable once constructed; the checksum covers the raw source
/// text the statements were split from, so any later edit to the source is
/// detectable against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationUnit {
    /// Unique, monotonically ordered identifier.
    pub version: Version,
    /// Descriptive name (no identity semantics).
    pub name: UnitName,
    /// Statements in the literal order they appear in the source.
    pub statements: Vec<String>,
    /// SHA-256 of the raw source text.
    pub checksum: String,
    /// Source file, when the unit came from a directory scan.
    pub path: Option<PathBuf>,
}

impl MigrationUnit {
    /// Construct a unit from pre-split statements and its raw-source checksum.
    pub fn new(
        version: Version,
        name: UnitName,
        statements: Vec<String>,
        checksum: String,
        path: Option<PathBuf>,
    ) -> Self {
        Self {
            version,
            name,
            statements,
            checksum,
            path,
        }
    }

    /// Canonical display label, e.g. `v0003_add_index`.
    pub fn label(&self) -> String {
        format!("{}_{}", self.version.file_prefix(), self.name)
    }

    /// Number of statements in this unit.
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }
}

impl std::fmt::Display for MigrationUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
#[path = "unit_test.rs"]
mod tests;
