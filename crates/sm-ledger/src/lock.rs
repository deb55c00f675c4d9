//! Single-writer engine lock.
//!
//! A dedicated one-row table in the target database, because competing
//! migration runs may be separate processes and in-process mutual exclusion
//! cannot see them. Acquisition inserts the row (the primary key rejects a
//! second holder) and polls with a bounded timeout; release deletes the row
//! only when it still belongs to this holder.

use crate::ddl::LOCK_TABLE;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::format_timestamp;
use chrono::Utc;
use sm_core::config::LockConfig;
use sm_core::sql_utils::escape_literal;
use sm_db::{Database, DbError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Lock acquisition tuning.
#[derive(Debug, Clone, Copy)]
pub struct LockSettings {
    /// Total time to wait before giving up with `LockTimeout`.
    pub timeout: Duration,
    /// Delay between acquisition attempts.
    pub poll_interval: Duration,
}

impl LockSettings {
    /// Build settings from the project configuration.
    pub fn from_config(config: &LockConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

impl Default for LockSettings {
    fn default() -> Self {
        Self::from_config(&LockConfig::default())
    }
}

/// The engine lock for one target database.
pub struct EngineLock {
    db: Arc<dyn Database>,
    holder: String,
}

impl EngineLock {
    /// Create a lock handle with a fresh holder identity.
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self {
            db,
            holder: Uuid::new_v4().to_string(),
        }
    }

    /// This handle's holder identity (recorded in the lock row).
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Acquire the lock, polling until `settings.timeout` expires.
    ///
    /// The ledger storage must exist (see `Ledger::ensure`) before calling.
    pub async fn acquire(&self, settings: &LockSettings) -> LedgerResult<LockGuard> {
        let deadline = Instant::now() + settings.timeout;
        let mut contended = false;

        loop {
            if self.try_acquire().await? {
                return Ok(LockGuard {
                    db: Arc::clone(&self.db),
                    holder: self.holder.clone(),
                    released: false,
                });
            }
            if !contended {
                log::warn!("Engine lock is held; waiting up to {:?}", settings.timeout);
                contended = true;
            }
            if Instant::now() >= deadline {
                return Err(LedgerError::LockTimeout {
                    timeout_secs: settings.timeout.as_secs(),
                    holder: self.current_holder().await?,
                });
            }
            tokio::time::sleep(settings.poll_interval).await;
        }
    }

    async fn try_acquire(&self) -> LedgerResult<bool> {
        let insert = format!(
            "INSERT INTO {LOCK_TABLE} (id, holder, acquired_at) \
             VALUES (1, '{}', TIMESTAMP '{}')",
            escape_literal(&self.holder),
            format_timestamp(Utc::now()),
        );
        match self.db.execute(&insert).await {
            Ok(_) => Ok(true),
            Err(e) if is_constraint_violation(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn current_holder(&self) -> LedgerResult<String> {
        let rows = self
            .db
            .query_rows(&format!("SELECT holder FROM {LOCK_TABLE} WHERE id = 1"))
            .await?;
        Ok(rows
            .first()
            .and_then(|r| r.first())
            .cloned()
            .unwrap_or_else(|| "unknown".to_string()))
    }
}

/// Classify a database error as lock contention.
///
/// The trait surfaces driver errors as strings, so we match the constraint
/// wording narrowly to avoid mistaking unrelated failures for contention.
fn is_constraint_violation(err: &DbError) -> bool {
    let msg = err.to_string();
    msg.contains("Constraint Error") || msg.contains("violates primary key")
}

/// Proof of lock ownership.
///
/// Must be released explicitly via [`release`](LockGuard::release); async
/// cleanup cannot run in `Drop`, so a guard dropped without release leaves
/// the lock row behind and logs the leak.
pub struct LockGuard {
    db: Arc<dyn Database>,
    holder: String,
    released: bool,
}

impl LockGuard {
    /// Release the lock, deleting the row only if this holder still owns it.
    pub async fn release(mut self) -> LedgerResult<()> {
        self.db
            .execute(&format!(
                "DELETE FROM {LOCK_TABLE} WHERE id = 1 AND holder = '{}'",
                escape_literal(&self.holder)
            ))
            .await?;
        self.released = true;
        Ok(())
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released {
            log::warn!(
                "Engine lock guard dropped without release; \
                 row for holder {} remains in {LOCK_TABLE}",
                self.holder
            );
        }
    }
}

#[cfg(test)]
#[path = "lock_test.rs"]
mod tests;
