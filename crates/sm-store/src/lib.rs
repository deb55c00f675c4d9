//! sm-store - Migration store for Stonemason
//!
//! A [`MigrationSource`] yields the ordered sequence of migration units the
//! executor applies. Two implementations ship: [`DirectorySource`] scans the
//! project's migration directories for `v{N}_{name}.sql` files, and
//! [`EmbeddedSource`] serves a compile-time manifest for engines embedded in
//! a host binary. Alternate sources substitute without touching the executor.

pub mod directory;
pub mod embedded;
pub mod error;
pub mod source;
pub mod split;

pub use directory::{parse_file_name, DirectorySource};
pub use embedded::{EmbeddedMigration, EmbeddedSource};
pub use error::{StoreError, StoreResult};
pub use source::MigrationSource;
pub use split::split_statements;
