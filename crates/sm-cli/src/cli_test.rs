use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn up_defaults_to_real_run() {
    let cli = Cli::try_parse_from(["sm", "up"]).unwrap();
    match cli.command {
        Commands::Up(args) => assert!(!args.dry_run),
        other => panic!("expected Up, got {other:?}"),
    }
}

#[test]
fn status_accepts_json_output() {
    let cli = Cli::try_parse_from(["sm", "status", "--output", "json"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, OutputFormat::Json),
        other => panic!("expected Status, got {other:?}"),
    }
}

#[test]
fn global_flags_work_after_subcommand() {
    let cli = Cli::try_parse_from(["sm", "up", "--target", "prod", "-p", "/srv/app"]).unwrap();
    assert_eq!(cli.global.target.as_deref(), Some("prod"));
    assert_eq!(cli.global.project_dir, "/srv/app");
}
