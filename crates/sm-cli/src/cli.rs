//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stonemason - a forward-only SQL schema migration tool
#[derive(Parser, Debug)]
#[command(name = "sm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override target (database connection)
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new Stonemason project
    Init(InitArgs),

    /// Author the next migration file
    New(NewArgs),

    /// Apply pending migrations in version order
    Up(UpArgs),

    /// Show applied vs pending migrations
    Status(StatusArgs),

    /// Check applied migrations for drift against their source files
    Verify(VerifyArgs),
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create
    pub name: String,

    /// Path of the target database, written into stonemason.yml
    #[arg(short, long, default_value = "stonemason.duckdb")]
    pub database_path: String,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Descriptive migration name ([a-z0-9_]+)
    pub name: String,
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Validate and report the plan without applying anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats for reporting commands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
