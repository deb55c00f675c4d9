//! Transactional application of migration units.

use crate::error::{RunError, RunResult};
use crate::plan::MigrationPlan;
use chrono::Utc;
use sm_core::{MigrationUnit, Version};
use sm_db::Database;
use sm_ledger::{EngineLock, Ledger, LockSettings};
use sm_store::MigrationSource;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A unit applied by this run.
#[derive(Debug, Clone)]
pub struct AppliedUnit {
    pub version: Version,
    pub label: String,
    pub statements: usize,
    pub duration: Duration,
}

/// The unit that stopped this run.
#[derive(Debug, Clone)]
pub struct FailedUnit {
    pub version: Version,
    pub label: String,
    /// Index of the failing statement, when the failure was a statement.
    pub statement_index: Option<usize>,
    pub error: String,
}

/// Outcome of one `migrate()` invocation.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Units applied by this run, in order.
    pub applied: Vec<AppliedUnit>,
    /// First failure; later units are never attempted.
    pub failure: Option<FailedUnit>,
    /// Pending units not attempted because of the failure.
    pub skipped: Vec<Version>,
}

impl RunSummary {
    /// Whether the run applied everything it planned to.
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Applies migration units against one target database.
pub struct Executor {
    db: Arc<dyn Database>,
    ledger: Ledger,
    lock_settings: LockSettings,
}

impl Executor {
    /// Create an executor over a database connection.
    pub fn new(db: Arc<dyn Database>, lock_settings: LockSettings) -> Self {
        let ledger = Ledger::new(Arc::clone(&db));
        Self {
            db,
            ledger,
            lock_settings,
        }
    }

    /// The executor's ledger view, for status and drift reporting.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Apply every pending unit from `source`, in version order, fail-fast.
    ///
    /// Holds the engine lock for the whole run. Pre-flight validation
    /// (ordering, drift) happens under the lock, before any unit executes;
    /// its failures surface as `Err`. A unit failure mid-run is reported in
    /// the returned [`RunSummary`] so callers still see what was applied
    /// before the stop.
    pub async fn migrate(&self, source: &dyn MigrationSource) -> RunResult<RunSummary> {
        self.ledger.ensure().await?;

        let lock = EngineLock::new(Arc::clone(&self.db));
        let guard = lock.acquire(&self.lock_settings).await?;

        let run_result = self.migrate_locked(source).await;
        let release_result = guard.release().await;

        match (run_result, release_result) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(release_err)) => Err(release_err.into()),
            (Err(run_err), Ok(())) => Err(run_err),
            (Err(run_err), Err(release_err)) => {
                log::warn!("Engine lock release failed after run error: {release_err}");
                Err(run_err)
            }
        }
    }

    /// Compute and validate the plan without applying anything.
    ///
    /// Does not take the lock or create ledger storage, so it is safe to run
    /// against a database another process is migrating.
    pub async fn dry_run(&self, source: &dyn MigrationSource) -> RunResult<MigrationPlan> {
        let units = source.list()?;
        let records = self.ledger.records().await?;
        MigrationPlan::build(units, &records)
    }

    async fn migrate_locked(&self, source: &dyn MigrationSource) -> RunResult<RunSummary> {
        let units = source.list()?;
        let records = self.ledger.records().await?;
        let plan = MigrationPlan::build(units, &records)?;

        log::debug!(
            "{} applied, {} pending from {}",
            plan.applied_count(),
            plan.pending_count(),
            source.describe()
        );

        let mut summary = RunSummary::default();
        let mut pending = plan.pending();

        for unit in pending.by_ref() {
            log::debug!("Applying {}", unit.label());
            match self.apply(unit).await {
                Ok(applied) => summary.applied.push(applied),
                Err(e) => {
                    let statement_index = match &e {
                        RunError::StatementFailed {
                            statement_index, ..
                        } => Some(*statement_index),
                        _ => None,
                    };
                    summary.failure = Some(FailedUnit {
                        version: unit.version,
                        label: unit.label(),
                        statement_index,
                        error: e.to_string(),
                    });
                    break;
                }
            }
        }
        // Fail-fast: everything after the failure is left untouched
        summary.skipped = pending.map(|u| u.version).collect();

        Ok(summary)
    }

    /// Apply a single unit inside one transaction, then record it.
    ///
    /// On any statement failure the whole unit rolls back; partial
    /// application is never observable.
    pub async fn apply(&self, unit: &MigrationUnit) -> RunResult<AppliedUnit> {
        let start = Instant::now();

        self.db.begin().await?;
        for (index, statement) in unit.statements.iter().enumerate() {
            if let Err(cause) = self.db.execute_batch(statement).await {
                if let Err(rollback_err) = self.db.rollback().await {
                    log::warn!("Rollback of {} failed: {rollback_err}", unit.label());
                }
                return Err(RunError::StatementFailed {
                    unit: unit.label(),
                    version: unit.version,
                    statement_index: index,
                    cause,
                });
            }
        }
        if let Err(commit_err) = self.db.commit().await {
            if let Err(rollback_err) = self.db.rollback().await {
                log::warn!("Rollback of {} failed: {rollback_err}", unit.label());
            }
            return Err(commit_err.into());
        }

        self.ledger.record(unit, Utc::now()).await?;

        Ok(AppliedUnit {
            version: unit.version,
            label: unit.label(),
            statements: unit.statement_count(),
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
