//! New command implementation - authors the next migration file

use anyhow::{Context, Result};
use sm_core::{UnitName, Version};
use sm_store::parse_file_name;
use std::fs;
use std::path::Path;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::load_project;

/// Execute the new command
pub(crate) async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let name = UnitName::try_new(args.name.as_str()).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid migration name '{}': expected [a-z0-9_]+",
            args.name
        )
    })?;

    // New files go into the first configured migration directory
    let paths = project.migration_paths();
    let target_dir = paths
        .first()
        .context("No migration_paths configured")?
        .clone();
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("Failed to create {}", target_dir.display()))?;

    // Allocate max + 1, scanning file names only so a still-unfinished
    // migration body doesn't block authoring the next one
    let mut max_version = 0u64;
    for dir in &paths {
        max_version = max_version.max(max_version_in(dir)?);
    }
    let next = Version::new(max_version + 1);

    let file_name = format!("{}_{}.sql", next.file_prefix(), name);
    let file_path = target_dir.join(&file_name);
    if file_path.exists() {
        anyhow::bail!("{} already exists", file_path.display());
    }

    let template = format!(
        "-- Migration {prefix}_{name}.\n\
         -- Statements run in order inside a single transaction; the file is\n\
         -- immutable once applied anywhere.\n",
        prefix = next.file_prefix(),
        name = name,
    );
    fs::write(&file_path, template)
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    println!("Created {}", file_path.display());
    println!();
    println!("Add your DDL statements, then run:");
    println!("  sm up");

    Ok(())
}

/// Highest version among `v{N}_{name}.sql` files in `dir` (0 when empty).
fn max_version_in(dir: &Path) -> Result<u64> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut max = 0u64;
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?
    {
        let path = entry
            .with_context(|| format!("Failed to read {}", dir.display()))?
            .path();
        if !path.is_file() || !path.extension().is_some_and(|e| e == "sql") {
            continue;
        }
        let (version, _) = parse_file_name(&path)?;
        max = max.max(version.value());
    }
    Ok(max)
}

#[cfg(test)]
#[path = "new_test.rs"]
mod tests;
