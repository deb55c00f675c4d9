//! Migration source trait definition

use crate::error::{StoreError, StoreResult};
use sm_core::MigrationUnit;

/// An ordered source of migration units.
///
/// The executor only ever sees this trait, so a filesystem scan, an embedded
/// manifest, or a remote registry are interchangeable.
pub trait MigrationSource: Send + Sync {
    /// List every unit this source knows, sorted by ascending version.
    ///
    /// Fails with [`StoreError::DuplicateVersion`] when two units share a
    /// version and [`StoreError::MalformedUnit`] when a unit cannot be read.
    fn list(&self) -> StoreResult<Vec<MigrationUnit>>;

    /// Human-readable description of where the units come from.
    fn describe(&self) -> String;
}

/// Sort units by version and reject duplicates.
///
/// Shared by every source implementation so the ordering and uniqueness
/// guarantees of `list()` hold regardless of where units come from.
pub(crate) fn sort_and_check(mut units: Vec<MigrationUnit>) -> StoreResult<Vec<MigrationUnit>> {
    units.sort_by_key(|u| u.version);
    for pair in units.windows(2) {
        if pair[0].version == pair[1].version {
            return Err(StoreError::DuplicateVersion {
                version: pair[0].version,
                first: pair[0].label(),
                second: pair[1].label(),
            });
        }
    }
    Ok(units)
}
