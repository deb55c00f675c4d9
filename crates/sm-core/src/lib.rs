//! sm-core - Core library for Stonemason
//!
//! This crate provides the shared vocabulary of the migration engine:
//! version identifiers, migration units, content checksums, project
//! configuration parsing, and the core error taxonomy used across all
//! Stonemason components.

pub mod checksum;
pub mod config;
pub mod error;
pub mod project;
pub mod sql_utils;
pub mod unit;
pub mod unit_name;
pub mod version;

pub use checksum::{checksum_hex, short_checksum};
pub use config::{Config, DatabaseConfig, DbType, LockConfig, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use project::Project;
pub use unit::MigrationUnit;
pub use unit_name::UnitName;
pub use version::Version;
