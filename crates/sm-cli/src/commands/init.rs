//! Init command implementation - scaffolds a new Stonemason project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Stonemason project: {}\n", args.name);

    fs::create_dir_all(project_dir.join("migrations"))
        .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;

    // Generate stonemason.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{name}"
version: "1.0.0"

migration_paths: ["migrations"]

database:
  type: duckdb
  path: "{db_path}"

# targets:
#   prod:
#     database:
#       type: duckdb
#       path: "/var/lib/{name}/prod.duckdb"

# lock:
#   timeout_secs: 30
#   poll_interval_ms: 250
"#,
        name = safe_name,
        db_path = safe_db_path,
    );
    fs::write(project_dir.join("stonemason.yml"), config_content)
        .context("Failed to write stonemason.yml")?;

    // Generate example migration
    let example_sql = r#"-- First migration: create an example table.
-- Statements run in order inside a single transaction.
CREATE TABLE example (
    id         BIGINT PRIMARY KEY,
    created_at TIMESTAMP NOT NULL
);
"#;
    fs::write(
        project_dir.join("migrations/v0001_initial.sql"),
        example_sql,
    )
    .context("Failed to write example migration")?;

    // Generate .gitignore
    let gitignore = "*.duckdb\n*.duckdb.wal\n";
    fs::write(project_dir.join(".gitignore"), gitignore).context("Failed to write .gitignore")?;

    println!("  Created stonemason.yml");
    println!("  Created migrations/v0001_initial.sql");
    println!("  Created .gitignore");
    println!();
    println!("Project '{}' initialized successfully!", args.name);
    println!();
    println!("Next steps:");
    println!("  cd {}", args.name);
    println!("  sm status    # Show pending migrations");
    println!("  sm up        # Apply them");

    Ok(())
}
