use super::*;

#[test]
fn test_parse_minimal_config() {
    let yaml = r#"
name: test_project
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.name, "test_project");
    assert_eq!(config.migration_paths, vec!["migrations".to_string()]);
    assert_eq!(config.database.db_type, DbType::DuckDb);
    assert_eq!(config.database.path, ":memory:");
    assert_eq!(config.lock.timeout_secs, 30);
    assert_eq!(config.lock.poll_interval_ms, 250);

    let root = std::path::PathBuf::from("/tmp/test");
    assert_eq!(
        config.migration_paths_absolute(&root),
        vec![root.join("migrations")]
    );
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: rollup_schema
version: "2.0.0"
migration_paths: ["migrations", "hotfixes"]
database:
  type: duckdb
  path: "./warehouse.duckdb"
targets:
  prod:
    database:
      type: duckdb
      path: "/var/lib/rollup/prod.duckdb"
lock:
  timeout_secs: 5
  poll_interval_ms: 100
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.name, "rollup_schema");
    assert_eq!(config.migration_paths.len(), 2);
    assert_eq!(config.lock.timeout_secs, 5);
    assert_eq!(config.available_targets(), vec!["prod"]);
}

#[test]
fn test_target_database_override() {
    let yaml = r#"
name: test
database:
  type: duckdb
  path: "dev.duckdb"
targets:
  prod:
    database:
      type: duckdb
      path: "prod.duckdb"
  staging: {}
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();

    let base = config.get_database_config(None).unwrap();
    assert_eq!(base.path, "dev.duckdb");

    let prod = config.get_database_config(Some("prod")).unwrap();
    assert_eq!(prod.path, "prod.duckdb");

    // Target without a database override falls back to the base config
    let staging = config.get_database_config(Some("staging")).unwrap();
    assert_eq!(staging.path, "dev.duckdb");
}

#[test]
fn test_unknown_target_is_rejected() {
    let config: Config = serde_yaml::from_str("name: test").unwrap();
    let err = config.get_database_config(Some("nope")).unwrap_err();
    assert!(err.to_string().contains("Target 'nope' not found"));
}

#[test]
fn test_unknown_field_is_rejected() {
    let yaml = r#"
name: test
model_paths: ["models"]
"#;
    assert!(serde_yaml::from_str::<Config>(yaml).is_err());
}

#[test]
fn test_load_rejects_empty_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stonemason.yml");
    std::fs::write(&path, "name: \"\"\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("E003"), "got: {err}");
}

#[test]
fn test_load_rejects_zero_lock_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stonemason.yml");
    std::fs::write(&path, "name: test\nlock:\n  timeout_secs: 0\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn test_load_from_dir_finds_yml_and_yaml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stonemason.yaml"), "name: via_yaml\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "via_yaml");

    // .yml takes precedence over .yaml
    std::fs::write(dir.path().join("stonemason.yml"), "name: via_yml\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "via_yml");
}

#[test]
fn test_load_from_dir_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("E001"), "got: {err}");
}

#[test]
fn test_resolve_target_prefers_cli_flag() {
    assert_eq!(
        Config::resolve_target(Some("prod")),
        Some("prod".to_string())
    );
}
