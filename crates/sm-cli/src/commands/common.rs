//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sm_core::{Config, Project};
use sm_db::{Database, DuckDbBackend};
use sm_ledger::LockSettings;
use sm_runner::Executor;
use sm_store::DirectorySource;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error. If anyhow's Display chain ever reaches this
        // (e.g. downcast_ref fails in main.rs), we don't want "exit code N"
        // leaking into stderr.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project from global CLI arguments.
///
/// `--config` overrides where the config file is read from; the project
/// root stays `--project-dir` either way so relative migration paths keep
/// resolving against the project.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    match &global.config {
        Some(config_path) => {
            log::debug!("Using config override {config_path}");
            let config =
                Config::load(Path::new(config_path)).context("Failed to load config override")?;
            Ok(Project {
                root: Path::new(&global.project_dir).to_path_buf(),
                config,
            })
        }
        None => Project::load(&global.project_dir).context("Failed to load project"),
    }
}

/// Create a database connection from the project config and target override.
pub(crate) fn create_database_connection(
    project: &Project,
    global: &GlobalArgs,
) -> Result<Arc<dyn Database>> {
    let resolved_target = Config::resolve_target(global.target.as_deref());
    let db_config = project
        .config
        .get_database_config(resolved_target.as_deref())
        .context("Failed to get database configuration")?;

    if global.verbose {
        eprintln!(
            "[verbose] Connecting to {} database at {}",
            db_config.db_type, db_config.path
        );
    }

    let db: Arc<dyn Database> =
        Arc::new(DuckDbBackend::new(&db_config.path).context("Failed to connect to database")?);
    Ok(db)
}

/// Build the executor and migration source for a loaded project.
pub(crate) fn build_executor(
    project: &Project,
    global: &GlobalArgs,
) -> Result<(Executor, DirectorySource)> {
    let db = create_database_connection(project, global)?;
    let executor = Executor::new(db, LockSettings::from_config(&project.config.lock));
    let source = DirectorySource::new(project.migration_paths());
    Ok((executor, source))
}

// ---------------------------------------------------------------------------
// Table-printing utilities
// ---------------------------------------------------------------------------

/// Calculate column widths for a table given headers and row data.
///
/// For each column, returns the maximum width across the header and all
/// row values so that data aligns when printed with left-padding.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// Calculates column widths from `headers` and `rows`, then prints
/// a left-aligned header row, a separator line of dashes, and each
/// data row.  Columns are separated by two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}
