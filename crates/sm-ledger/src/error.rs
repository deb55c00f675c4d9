//! Error types for the ledger.

use sm_core::Version;
use thiserror::Error;

/// Ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Underlying database failure (L001).
    #[error("[L001] Ledger database error")]
    Db(#[from] sm_db::DbError),

    /// Ledger row could not be interpreted (L002).
    #[error("[L002] Ledger query failed: {message}")]
    Query { message: String },

    /// A record for this version already exists (L003).
    #[error("[L003] Migration {version} is already recorded as applied")]
    AlreadyRecorded { version: Version },

    /// Engine lock not acquired within the configured timeout (L004).
    #[error(
        "[L004] Engine lock not acquired within {timeout_secs}s (held by {holder}); \
         another migration run is in progress"
    )]
    LockTimeout { timeout_secs: u64, holder: String },
}

/// Result type alias for [`LedgerError`].
pub type LedgerResult<T> = Result<T, LedgerError>;
