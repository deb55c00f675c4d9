//! Run planning: pending-set computation and pre-flight validation.

use crate::error::{RunError, RunResult};
use chrono::{DateTime, Utc};
use sm_core::{short_checksum, MigrationUnit, Version};
use sm_ledger::AppliedRecord;
use std::collections::BTreeMap;

/// Lifecycle state of one migration unit.
///
/// `Applied` is terminal; `Failed` permits operator retry only after the
/// underlying cause is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    Pending,
    Applying,
    Applied,
    Failed,
}

impl std::fmt::Display for UnitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitState::Pending => write!(f, "pending"),
            UnitState::Applying => write!(f, "applying"),
            UnitState::Applied => write!(f, "applied"),
            UnitState::Failed => write!(f, "failed"),
        }
    }
}

/// One unit of a validated plan.
#[derive(Debug, Clone)]
pub struct PlannedUnit {
    pub unit: MigrationUnit,
    pub state: UnitState,
    /// When the unit was applied, for `Applied` units.
    pub applied_at: Option<DateTime<Utc>>,
}

/// A validated migration plan: every store unit, annotated against the
/// ledger, ordering and drift already checked.
#[derive(Debug, Clone)]
pub struct MigrationPlan {
    units: Vec<PlannedUnit>,
}

impl MigrationPlan {
    /// Build a plan from the store's units and the ledger's records.
    ///
    /// Pre-flight validation, in order:
    /// 1. every applied record must have a source unit ([`RunError::MissingApplied`]);
    /// 2. every applied unit's checksum must match ([`RunError::ChecksumMismatch`]);
    /// 3. no pending unit may be older than the newest applied unit
    ///    ([`RunError::OrderingViolation`]).
    ///
    /// `units` must already be sorted by version (the store guarantees it).
    pub fn build(units: Vec<MigrationUnit>, records: &[AppliedRecord]) -> RunResult<Self> {
        let recorded: BTreeMap<Version, &AppliedRecord> =
            records.iter().map(|r| (r.version, r)).collect();

        for record in records {
            match units.iter().find(|u| u.version == record.version) {
                None => {
                    return Err(RunError::MissingApplied {
                        version: record.version,
                        name: record.name.clone(),
                    })
                }
                Some(unit) if unit.checksum != record.checksum => {
                    return Err(RunError::ChecksumMismatch {
                        version: record.version,
                        recorded: short_checksum(&record.checksum).to_string(),
                        current: short_checksum(&unit.checksum).to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        if let Some(applied_max) = recorded.keys().next_back().copied() {
            if let Some(skipped) = units
                .iter()
                .find(|u| u.version < applied_max && !recorded.contains_key(&u.version))
            {
                return Err(RunError::OrderingViolation {
                    skipped: skipped.version,
                    applied_max,
                });
            }
        }

        let units = units
            .into_iter()
            .map(|unit| {
                let record = recorded.get(&unit.version);
                PlannedUnit {
                    state: if record.is_some() {
                        UnitState::Applied
                    } else {
                        UnitState::Pending
                    },
                    applied_at: record.map(|r| r.applied_at),
                    unit,
                }
            })
            .collect();

        Ok(Self { units })
    }

    /// Every unit, in version order.
    pub fn units(&self) -> &[PlannedUnit] {
        &self.units
    }

    /// Pending units, in the order they will be applied.
    pub fn pending(&self) -> impl Iterator<Item = &MigrationUnit> {
        self.units
            .iter()
            .filter(|p| p.state == UnitState::Pending)
            .map(|p| &p.unit)
    }

    /// Number of pending units.
    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    /// Number of applied units.
    pub fn applied_count(&self) -> usize {
        self.units.len() - self.pending_count()
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
