//! Verify command implementation - drift detection for applied migrations

use anyhow::{Context, Result};
use sm_core::short_checksum;
use sm_ledger::{Drift, Ledger};
use sm_store::{DirectorySource, MigrationSource};
use std::sync::Arc;

use crate::cli::{GlobalArgs, OutputFormat, VerifyArgs};
use crate::commands::common::{create_database_connection, load_project, print_table, ExitCode};

/// Execute the verify command
pub(crate) async fn execute(args: &VerifyArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = create_database_connection(&project, global)?;
    let ledger = Ledger::new(Arc::clone(&db));

    let source = DirectorySource::new(project.migration_paths());
    let units = source.list().context("Failed to list migrations")?;
    let checked = ledger.records().await.context("Failed to read ledger")?.len();
    let drift = ledger
        .verify_all(&units)
        .await
        .context("Failed to check ledger drift")?;

    let rows: Vec<DriftRow> = drift.iter().map(DriftRow::from).collect();

    match args.output {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!(
                    "Verified {} applied migration{}: no drift",
                    checked,
                    if checked == 1 { "" } else { "s" }
                );
            } else {
                let table_rows: Vec<Vec<String>> = rows
                    .iter()
                    .map(|r| {
                        vec![r.version.to_string(), r.kind.clone(), r.detail.clone()]
                    })
                    .collect();
                print_table(&["VERSION", "DRIFT", "DETAIL"], &table_rows);
                println!();
                println!(
                    "{} of {} applied migration{} drifted",
                    rows.len(),
                    checked,
                    if checked == 1 { "" } else { "s" }
                );
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).context("Failed to serialize drift")?;
            println!("{}", json);
        }
    }

    if rows.is_empty() {
        Ok(())
    } else {
        // Drift always requires operator action; never auto-corrected
        Err(ExitCode(1).into())
    }
}

/// One reported divergence
#[derive(Debug, serde::Serialize)]
struct DriftRow {
    version: u64,
    kind: String,
    detail: String,
}

impl From<&Drift> for DriftRow {
    fn from(drift: &Drift) -> Self {
        match drift {
            Drift::ChecksumMismatch {
                version,
                recorded,
                current,
            } => Self {
                version: version.value(),
                kind: "checksum_mismatch".to_string(),
                detail: format!(
                    "recorded {} but source is now {}",
                    short_checksum(recorded),
                    short_checksum(current)
                ),
            },
            Drift::MissingSource { version, name } => Self {
                version: version.value(),
                kind: "missing_source".to_string(),
                detail: format!("applied as '{}' but no source file remains", name),
            },
        }
    }
}
