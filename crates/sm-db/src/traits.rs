//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for Stonemason
///
/// The executor drives migration statements through this trait; the ledger
/// stores applied records and the lock row through it. Implementations must
/// be Send + Sync for async operation.
///
/// Transactions are connection-scoped: [`begin`](Database::begin) opens a
/// boundary on the implementation's single logical connection, and every
/// `execute`/`execute_batch` until [`commit`](Database::commit) or
/// [`rollback`](Database::rollback) participates in it. Stonemason is
/// single-writer by construction (the engine lock), so no nested or
/// concurrent transactions exist.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one SQL statement, returning the affected row count
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a query and return every row with all columns rendered as
    /// strings (integers, floats, and booleans via their display form,
    /// NULL as "null")
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Vec<String>>>;

    /// Execute a query returning its row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Create a schema if it does not exist
    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()>;

    /// Open a transaction boundary
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
