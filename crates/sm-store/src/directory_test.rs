use super::*;
use tempfile::TempDir;

fn write_migration(dir: &TempDir, file_name: &str, sql: &str) {
    std::fs::write(dir.path().join(file_name), sql).unwrap();
}

fn source(dir: &TempDir) -> DirectorySource {
    DirectorySource::new(vec![dir.path().to_path_buf()])
}

#[test]
fn list_sorts_by_version() {
    let dir = TempDir::new().unwrap();
    write_migration(&dir, "v0010_third.sql", "CREATE TABLE c (id INTEGER);");
    write_migration(&dir, "v0002_second.sql", "CREATE TABLE b (id INTEGER);");
    write_migration(&dir, "v0001_first.sql", "CREATE TABLE a (id INTEGER);");

    let units = source(&dir).list().unwrap();
    let labels: Vec<String> = units.iter().map(|u| u.label()).collect();
    assert_eq!(labels, vec!["v0001_first", "v0002_second", "v0010_third"]);
}

#[test]
fn list_parses_statements_and_checksum() {
    let dir = TempDir::new().unwrap();
    let sql = "CREATE TABLE a (id INTEGER);\nCREATE INDEX i ON a (id);\n";
    write_migration(&dir, "v0001_initial.sql", sql);

    let units = source(&dir).list().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].statement_count(), 2);
    assert_eq!(units[0].checksum, sm_core::checksum_hex(sql));
    assert_eq!(units[0].name, sm_core::UnitName::new("initial"));
    assert!(units[0].path.is_some());
}

#[test]
fn duplicate_versions_are_rejected() {
    let dir = TempDir::new().unwrap();
    // Same numeric version, different padding
    write_migration(&dir, "v001_first.sql", "CREATE TABLE a (id INTEGER);");
    write_migration(&dir, "v1_other.sql", "CREATE TABLE b (id INTEGER);");

    let err = source(&dir).list().unwrap_err();
    assert!(err.to_string().contains("S003"), "got: {err}");
}

#[test]
fn non_sql_files_and_subdirectories_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_migration(&dir, "v0001_initial.sql", "CREATE TABLE a (id INTEGER);");
    std::fs::write(dir.path().join("README.md"), "notes").unwrap();
    std::fs::create_dir(dir.path().join("archive")).unwrap();

    let units = source(&dir).list().unwrap();
    assert_eq!(units.len(), 1);
}

#[test]
fn invalid_file_names_are_rejected() {
    for bad in [
        "0001_no_prefix.sql",
        "v0001.sql",
        "v0001-dashed-name.sql",
        "vx_name.sql",
    ] {
        let dir = TempDir::new().unwrap();
        write_migration(&dir, bad, "CREATE TABLE a (id INTEGER);");
        let err = source(&dir).list().unwrap_err();
        assert!(err.to_string().contains("S001"), "{bad} gave: {err}");
    }
}

#[test]
fn empty_unit_is_malformed() {
    let dir = TempDir::new().unwrap();
    write_migration(&dir, "v0001_empty.sql", "-- nothing here\n");

    let err = source(&dir).list().unwrap_err();
    assert!(err.to_string().contains("S002"), "got: {err}");
    assert!(err.to_string().contains("no executable statements"));
}

#[test]
fn missing_directory_is_an_io_error() {
    let missing = std::path::PathBuf::from("/nonexistent/migrations");
    let err = DirectorySource::new(vec![missing]).list().unwrap_err();
    assert!(err.to_string().contains("S004"), "got: {err}");
}

#[test]
fn multiple_directories_merge() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    write_migration(&dir_a, "v0001_first.sql", "CREATE TABLE a (id INTEGER);");
    write_migration(&dir_b, "v0002_second.sql", "CREATE TABLE b (id INTEGER);");

    let src = DirectorySource::new(vec![
        dir_a.path().to_path_buf(),
        dir_b.path().to_path_buf(),
    ]);
    let units = src.list().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].version, sm_core::Version::new(1));
}
