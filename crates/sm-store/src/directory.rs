//! Directory-backed migration source.
//!
//! Scans the project's migration directories for `v{N}_{name}.sql` files.
//! Every `.sql` file must match the naming scheme; other extensions and
//! subdirectories are ignored.

use crate::error::{StoreError, StoreResult};
use crate::source::{sort_and_check, MigrationSource};
use crate::split::split_statements;
use sm_core::{checksum_hex, MigrationUnit, UnitName, Version};
use std::path::{Path, PathBuf};

/// Migration source scanning one or more directories.
pub struct DirectorySource {
    paths: Vec<PathBuf>,
}

impl DirectorySource {
    /// Create a source over the given directories (scanned in order).
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    fn scan_dir(&self, dir: &Path, units: &mut Vec<MigrationUnit>) -> StoreResult<()> {
        let entries = std::fs::read_dir(dir).map_err(|e| StoreError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io {
                path: dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() || !path.extension().is_some_and(|e| e == "sql") {
                continue;
            }
            units.push(load_unit(&path)?);
        }
        Ok(())
    }
}

impl MigrationSource for DirectorySource {
    fn list(&self) -> StoreResult<Vec<MigrationUnit>> {
        let mut units = Vec::new();
        for dir in &self.paths {
            self.scan_dir(dir, &mut units)?;
        }
        log::debug!(
            "Scanned {} migration director{}: {} units",
            self.paths.len(),
            if self.paths.len() == 1 { "y" } else { "ies" },
            units.len()
        );
        sort_and_check(units)
    }

    fn describe(&self) -> String {
        self.paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a migration file's `v{N}_{name}.sql` name into its version and name.
///
/// Only looks at the file name; used by `sm new` to allocate the next
/// version without reading (possibly still-unfinished) unit bodies.
pub fn parse_file_name(path: &Path) -> StoreResult<(Version, UnitName)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| StoreError::InvalidFileName {
            path: path.display().to_string(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;
    parse_file_stem(path, stem)
}

/// Parse a `v{N}_{name}` file stem into its version and name.
fn parse_file_stem(path: &Path, stem: &str) -> StoreResult<(Version, UnitName)> {
    let invalid = |reason: &str| StoreError::InvalidFileName {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let digits_and_name = stem
        .strip_prefix('v')
        .ok_or_else(|| invalid("expected 'v{N}_{name}.sql'"))?;
    let (digits, name) = digits_and_name
        .split_once('_')
        .ok_or_else(|| invalid("missing '_{name}' after the version"))?;

    let version = Version::parse(digits).map_err(|e| invalid(&e.to_string()))?;
    let name = UnitName::try_new(name)
        .ok_or_else(|| invalid("name must be non-empty [a-z0-9_]+"))?;
    Ok((version, name))
}

/// Read and parse one migration file.
fn load_unit(path: &Path) -> StoreResult<MigrationUnit> {
    let (version, name) = parse_file_name(path)?;

    let source = std::fs::read_to_string(path).map_err(|e| StoreError::MalformedUnit {
        unit: path.display().to_string(),
        message: e.to_string(),
    })?;

    let statements = split_statements(&path.display().to_string(), &source)?;
    if statements.is_empty() {
        return Err(StoreError::MalformedUnit {
            unit: path.display().to_string(),
            message: "contains no executable statements".to_string(),
        });
    }

    Ok(MigrationUnit::new(
        version,
        name,
        statements,
        checksum_hex(&source),
        Some(path.to_path_buf()),
    ))
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
