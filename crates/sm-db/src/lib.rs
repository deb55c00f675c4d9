//! sm-db - Database abstraction layer for Stonemason
//!
//! This crate provides the `Database` trait the executor and ledger are
//! written against, plus the DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
