//! Embedded DDL for the ledger's own tables.
//!
//! Everything is `IF NOT EXISTS` so [`crate::ledger::Ledger::ensure`] can run
//! on every invocation. Versions are stored as BIGINT, which caps usable
//! versions at i64::MAX, far beyond both sequence numbers and
//! timestamp-style identifiers.

/// Schema holding all engine-owned tables.
pub const LEDGER_SCHEMA: &str = "sm_meta";

/// Applied-record table, qualified.
pub const APPLIED_TABLE: &str = "sm_meta.applied_migrations";

/// Single-row lock table, qualified.
pub const LOCK_TABLE: &str = "sm_meta.engine_lock";

/// Create-if-absent DDL for the ledger tables (the schema itself is created
/// separately through the `Database` trait).
pub const ENSURE_LEDGER_SQL: &str = "\
CREATE TABLE IF NOT EXISTS sm_meta.applied_migrations (
    version    BIGINT PRIMARY KEY,
    name       VARCHAR NOT NULL,
    checksum   VARCHAR NOT NULL,
    applied_at TIMESTAMP NOT NULL
);
CREATE TABLE IF NOT EXISTS sm_meta.engine_lock (
    id          INTEGER PRIMARY KEY CHECK (id = 1),
    holder      VARCHAR NOT NULL,
    acquired_at TIMESTAMP NOT NULL
);";
