//! Embedded migration source.
//!
//! For engines compiled into a host binary: migrations live in a static
//! manifest, typically populated with `include_str!`.

use crate::error::{StoreError, StoreResult};
use crate::source::{sort_and_check, MigrationSource};
use crate::split::split_statements;
use sm_core::{checksum_hex, MigrationUnit, UnitName, Version};

/// One entry of an embedded migration manifest.
pub struct EmbeddedMigration {
    /// Sequential version number.
    pub version: u64,
    /// Descriptive name ([a-z0-9_]+).
    pub name: &'static str,
    /// Raw SQL, usually via `include_str!`.
    pub sql: &'static str,
}

/// Migration source backed by a compile-time manifest.
pub struct EmbeddedSource {
    migrations: &'static [EmbeddedMigration],
}

impl EmbeddedSource {
    /// Wrap a static manifest.
    pub const fn new(migrations: &'static [EmbeddedMigration]) -> Self {
        Self { migrations }
    }
}

impl MigrationSource for EmbeddedSource {
    fn list(&self) -> StoreResult<Vec<MigrationUnit>> {
        let mut units = Vec::with_capacity(self.migrations.len());
        for m in self.migrations {
            let version = Version::new(m.version);
            let label = format!("{}_{}", version.file_prefix(), m.name);
            let name = UnitName::try_new(m.name).ok_or_else(|| StoreError::MalformedUnit {
                unit: label.clone(),
                message: "name must be non-empty [a-z0-9_]+".to_string(),
            })?;
            let statements = split_statements(&label, m.sql)?;
            if statements.is_empty() {
                return Err(StoreError::MalformedUnit {
                    unit: label,
                    message: "contains no executable statements".to_string(),
                });
            }
            units.push(MigrationUnit::new(
                version,
                name,
                statements,
                checksum_hex(m.sql),
                None,
            ));
        }
        sort_and_check(units)
    }

    fn describe(&self) -> String {
        format!("embedded manifest ({} units)", self.migrations.len())
    }
}

#[cfg(test)]
#[path = "embedded_test.rs"]
mod tests;
