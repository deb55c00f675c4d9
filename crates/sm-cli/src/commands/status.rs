//! Status command implementation - applied vs pending listing

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sm_core::short_checksum;
use sm_ledger::{Drift, Ledger};
use sm_store::{DirectorySource, MigrationSource};
use std::sync::Arc;

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::{create_database_connection, load_project, print_table};

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = create_database_connection(&project, global)?;
    let ledger = Ledger::new(Arc::clone(&db));

    let source = DirectorySource::new(project.migration_paths());
    let units = source.list().context("Failed to list migrations")?;
    let records = ledger.records().await.context("Failed to read ledger")?;
    let drift = ledger
        .verify_all(&units)
        .await
        .context("Failed to check ledger drift")?;

    let mut rows: Vec<StatusRow> = Vec::with_capacity(units.len());
    for unit in &units {
        let record = records.iter().find(|r| r.version == unit.version);
        let drifted = drift.iter().any(
            |d| matches!(d, Drift::ChecksumMismatch { version, .. } if *version == unit.version),
        );
        rows.push(StatusRow {
            version: unit.version.value(),
            name: unit.name.to_string(),
            state: if record.is_some() { "applied" } else { "pending" }.to_string(),
            applied_at: record.map(|r| r.applied_at),
            checksum: short_checksum(&unit.checksum).to_string(),
            note: drifted.then(|| "checksum mismatch".to_string()),
        });
    }
    // Applied records whose source file is gone still belong in the listing
    for d in &drift {
        if let Drift::MissingSource { version, name } = d {
            let record = records.iter().find(|r| r.version == *version);
            rows.push(StatusRow {
                version: version.value(),
                name: name.clone(),
                state: "applied".to_string(),
                applied_at: record.map(|r| r.applied_at),
                checksum: record.map_or_else(String::new, |r| {
                    short_checksum(&r.checksum).to_string()
                }),
                note: Some("source file missing".to_string()),
            });
        }
    }
    rows.sort_by_key(|r| r.version);

    match args.output {
        OutputFormat::Table => {
            let table_rows: Vec<Vec<String>> = rows
                .iter()
                .map(|r| {
                    vec![
                        r.version.to_string(),
                        r.name.clone(),
                        r.state.clone(),
                        r.applied_at
                            .map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
                        r.checksum.clone(),
                        r.note.clone().unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect();
            print_table(
                &["VERSION", "NAME", "STATE", "APPLIED_AT", "CHECKSUM", "NOTE"],
                &table_rows,
            );

            let applied = rows.iter().filter(|r| r.state == "applied").count();
            let pending = rows.len() - applied;
            println!();
            println!("{} applied, {} pending", applied, pending);
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&rows).context("Failed to serialize status")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// One row of the status listing
#[derive(Debug, serde::Serialize)]
struct StatusRow {
    version: u64,
    name: String,
    state: String,
    applied_at: Option<DateTime<Utc>>,
    checksum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}
