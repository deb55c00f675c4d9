//! Up command implementation - applies pending migrations

use anyhow::{Context, Result};
use sm_store::MigrationSource;
use std::time::Instant;

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::{build_executor, load_project, ExitCode};

/// Execute the up command
pub(crate) async fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let (executor, source) = build_executor(&project, global)?;

    if global.verbose {
        eprintln!("[verbose] Migration source: {}", source.describe());
    }

    if args.dry_run {
        let plan = executor
            .dry_run(&source)
            .await
            .context("Migration plan validation failed")?;

        if plan.pending_count() == 0 {
            println!("Nothing to apply: {} migrations up to date", plan.applied_count());
            return Ok(());
        }
        println!("Would apply {} migrations:", plan.pending_count());
        for unit in plan.pending() {
            println!(
                "  {} ({} statement{})",
                unit.label(),
                unit.statement_count(),
                if unit.statement_count() == 1 { "" } else { "s" }
            );
        }
        return Ok(());
    }

    let start = Instant::now();
    let summary = executor
        .migrate(&source)
        .await
        .context("Migration run failed")?;

    for applied in &summary.applied {
        println!(
            "  \u{2713} {} ({} statement{}) [{}ms]",
            applied.label,
            applied.statements,
            if applied.statements == 1 { "" } else { "s" },
            applied.duration.as_millis()
        );
    }

    if let Some(failure) = &summary.failure {
        let at = match failure.statement_index {
            Some(index) => format!(" at statement {index}"),
            None => String::new(),
        };
        println!("  \u{2717} {}{} - {}", failure.label, at, failure.error);
        for version in &summary.skipped {
            println!("  - {} skipped", version);
        }
        println!();
        println!(
            "Failed on migration {} after applying {} ({:.2}s)",
            failure.version,
            summary.applied.len(),
            start.elapsed().as_secs_f64()
        );
        return Err(ExitCode(1).into());
    }

    println!();
    if summary.applied.is_empty() {
        println!("Nothing to apply: database is up to date");
    } else {
        println!(
            "Applied {} migration{} in {:.2}s",
            summary.applied.len(),
            if summary.applied.len() == 1 { "" } else { "s" },
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
