//! sm-ledger - Applied-set tracker for Stonemason
//!
//! The ledger lives inside the target database under the `sm_meta` schema:
//! one table recording which migration units have been applied (with their
//! checksums, for drift detection) and one single-row table serving as the
//! cross-process engine lock. Storage is created idempotently before first
//! use and never touched by migration units themselves.

pub mod ddl;
pub mod error;
pub mod ledger;
pub mod lock;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{AppliedRecord, Drift, Ledger};
pub use lock::{EngineLock, LockGuard, LockSettings};
