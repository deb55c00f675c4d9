//! Error types for sm-store

use sm_core::Version;
use thiserror::Error;

/// Migration store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// S001: A .sql file name does not match `v{N}_{name}.sql`
    #[error("[S001] Invalid migration file name '{path}': {reason}")]
    InvalidFileName { path: String, reason: String },

    /// S002: A unit's statements cannot be read
    #[error("[S002] Malformed migration unit '{unit}': {message}")]
    MalformedUnit { unit: String, message: String },

    /// S003: Two units share a version
    #[error("[S003] Duplicate migration version {version}: '{first}' and '{second}'")]
    DuplicateVersion {
        version: Version,
        first: String,
        second: String,
    },

    /// S004: IO error while scanning or reading migrations
    #[error("[S004] IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;
