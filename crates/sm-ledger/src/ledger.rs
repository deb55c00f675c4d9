//! Applied-record bookkeeping.

use crate::ddl::{APPLIED_TABLE, ENSURE_LEDGER_SQL, LEDGER_SCHEMA};
use crate::error::{LedgerError, LedgerResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use sm_core::sql_utils::escape_literal;
use sm_core::{MigrationUnit, Version};
use sm_db::Database;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// One row of `sm_meta.applied_migrations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRecord {
    pub version: Version,
    pub name: String,
    pub checksum: String,
    pub applied_at: DateTime<Utc>,
}

/// A divergence between the ledger and the migration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    /// An applied unit's current source no longer matches its recorded checksum.
    ChecksumMismatch {
        version: Version,
        recorded: String,
        current: String,
    },
    /// An applied record has no corresponding unit in the store.
    MissingSource { version: Version, name: String },
}

/// The applied-set tracker, stored in the target database.
pub struct Ledger {
    db: Arc<dyn Database>,
}

impl Ledger {
    /// Wrap a database connection.
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }

    /// Create the ledger schema and tables if absent. Idempotent.
    pub async fn ensure(&self) -> LedgerResult<()> {
        self.db.create_schema_if_not_exists(LEDGER_SCHEMA).await?;
        self.db.execute_batch(ENSURE_LEDGER_SQL).await?;
        Ok(())
    }

    /// Whether the ledger storage exists in the target database.
    ///
    /// Lets read-only operations (`sm status`) inspect a database without
    /// creating anything in it.
    pub async fn is_initialized(&self) -> LedgerResult<bool> {
        Ok(self.db.relation_exists(APPLIED_TABLE).await?)
    }

    /// All applied records, ordered by version.
    ///
    /// Returns an empty list when the ledger storage does not exist yet.
    pub async fn records(&self) -> LedgerResult<Vec<AppliedRecord>> {
        if !self.is_initialized().await? {
            return Ok(Vec::new());
        }
        let rows = self
            .db
            .query_rows(&format!(
                "SELECT CAST(version AS VARCHAR), name, checksum, CAST(applied_at AS VARCHAR) \
                 FROM {APPLIED_TABLE} ORDER BY version"
            ))
            .await?;

        rows.iter().map(|row| parse_record(row)).collect()
    }

    /// The set of applied versions.
    pub async fn applied_versions(&self) -> LedgerResult<BTreeSet<Version>> {
        Ok(self.records().await?.into_iter().map(|r| r.version).collect())
    }

    /// Persist one applied record.
    ///
    /// Fails with [`LedgerError::AlreadyRecorded`] when the version exists.
    pub async fn record(
        &self,
        unit: &MigrationUnit,
        applied_at: DateTime<Utc>,
    ) -> LedgerResult<()> {
        let existing = self
            .db
            .query_count(&format!(
                "SELECT version FROM {APPLIED_TABLE} WHERE version = {}",
                unit.version
            ))
            .await?;
        if existing > 0 {
            return Err(LedgerError::AlreadyRecorded {
                version: unit.version,
            });
        }

        self.db
            .execute(&format!(
                "INSERT INTO {APPLIED_TABLE} (version, name, checksum, applied_at) \
                 VALUES ({}, '{}', '{}', TIMESTAMP '{}')",
                unit.version,
                escape_literal(&unit.name),
                escape_literal(&unit.checksum),
                format_timestamp(applied_at),
            ))
            .await?;
        log::debug!("Recorded {} as applied", unit.label());
        Ok(())
    }

    /// Whether `unit`'s current checksum agrees with the ledger.
    ///
    /// Units that were never recorded trivially verify.
    pub async fn verify_checksum(&self, unit: &MigrationUnit) -> LedgerResult<bool> {
        let records = self.records().await?;
        Ok(records
            .iter()
            .find(|r| r.version == unit.version)
            .is_none_or(|r| r.checksum == unit.checksum))
    }

    /// Compare every applied record against the store's units.
    ///
    /// Reports checksum mismatches and applied records whose source unit no
    /// longer exists, ordered by version.
    pub async fn verify_all(&self, units: &[MigrationUnit]) -> LedgerResult<Vec<Drift>> {
        let by_version: BTreeMap<Version, &MigrationUnit> =
            units.iter().map(|u| (u.version, u)).collect();

        let mut drift = Vec::new();
        for record in self.records().await? {
            match by_version.get(&record.version) {
                Some(unit) if unit.checksum != record.checksum => {
                    drift.push(Drift::ChecksumMismatch {
                        version: record.version,
                        recorded: record.checksum,
                        current: unit.checksum.clone(),
                    });
                }
                Some(_) => {}
                None => drift.push(Drift::MissingSource {
                    version: record.version,
                    name: record.name,
                }),
            }
        }
        Ok(drift)
    }
}

/// Render a timestamp the way it is stored (microsecond precision, UTC).
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn parse_record(row: &[String]) -> LedgerResult<AppliedRecord> {
    let [version, name, checksum, applied_at] = row else {
        return Err(LedgerError::Query {
            message: format!("expected 4 columns in applied_migrations row, got {}", row.len()),
        });
    };

    let version = version
        .parse::<u64>()
        .map(Version::new)
        .map_err(|e| LedgerError::Query {
            message: format!("bad version '{version}': {e}"),
        })?;
    let applied_at = NaiveDateTime::parse_from_str(applied_at, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| LedgerError::Query {
            message: format!("bad applied_at '{applied_at}': {e}"),
        })?
        .and_utc();

    Ok(AppliedRecord {
        version,
        name: name.clone(),
        checksum: checksum.clone(),
        applied_at,
    })
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
