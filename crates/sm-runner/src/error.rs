//! Error types for sm-runner

use sm_core::Version;
use thiserror::Error;

/// Migration run errors
#[derive(Error, Debug)]
pub enum RunError {
    /// Store failure while listing units (R001)
    #[error("[R001] Migration store error")]
    Store(#[from] sm_store::StoreError),

    /// Ledger failure (R002)
    #[error("[R002] Ledger error")]
    Ledger(#[from] sm_ledger::LedgerError),

    /// Database failure outside a unit's statements (R003)
    #[error("[R003] Database error")]
    Db(#[from] sm_db::DbError),

    /// A unit's statement failed; the unit was rolled back (R004)
    #[error("[R004] Statement {statement_index} of {unit} failed; unit rolled back")]
    StatementFailed {
        unit: String,
        version: Version,
        statement_index: usize,
        #[source]
        cause: sm_db::DbError,
    },

    /// A pending unit is older than an already-applied unit (R005)
    #[error(
        "[R005] Ordering violation: migration {skipped} was never applied but \
         {applied_max} is already recorded; refusing to apply out of order"
    )]
    OrderingViolation {
        skipped: Version,
        applied_max: Version,
    },

    /// An applied unit's source changed after the fact (R006)
    #[error(
        "[R006] Checksum mismatch for applied migration {version}: \
         recorded {recorded}, current source is {current}"
    )]
    ChecksumMismatch {
        version: Version,
        recorded: String,
        current: String,
    },

    /// An applied record has no source unit (R007)
    #[error("[R007] Applied migration {version} ('{name}') is missing from the migration store")]
    MissingApplied { version: Version, name: String },
}

/// Result type alias for RunError
pub type RunResult<T> = Result<T, RunError>;
