use super::*;
use crate::cli::GlobalArgs;
use tempfile::TempDir;

fn project_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("stonemason.yml"),
        "name: sample\nmigration_paths: [\"migrations\"]\n",
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("migrations")).unwrap();
    dir
}

fn global_for(dir: &TempDir) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: dir.path().display().to_string(),
        config: None,
        target: None,
    }
}

#[tokio::test]
async fn new_allocates_version_one_in_empty_project() {
    let dir = project_dir();
    let args = NewArgs {
        name: "initial".to_string(),
    };

    execute(&args, &global_for(&dir)).await.unwrap();

    let path = dir.path().join("migrations/v0001_initial.sql");
    assert!(path.exists());
    let body = std::fs::read_to_string(path).unwrap();
    assert!(body.contains("v0001_initial"));
}

#[tokio::test]
async fn new_allocates_max_plus_one() {
    let dir = project_dir();
    std::fs::write(
        dir.path().join("migrations/v0007_existing.sql"),
        "CREATE TABLE t (id INTEGER);",
    )
    .unwrap();

    let args = NewArgs {
        name: "add_index".to_string(),
    };
    execute(&args, &global_for(&dir)).await.unwrap();

    assert!(dir.path().join("migrations/v0008_add_index.sql").exists());
}

#[tokio::test]
async fn new_works_while_previous_migration_is_unfinished() {
    let dir = project_dir();
    // Comment-only body: not yet a valid unit, but must not block authoring
    std::fs::write(
        dir.path().join("migrations/v0001_wip.sql"),
        "-- work in progress\n",
    )
    .unwrap();

    let args = NewArgs {
        name: "next".to_string(),
    };
    execute(&args, &global_for(&dir)).await.unwrap();
    assert!(dir.path().join("migrations/v0002_next.sql").exists());
}

#[tokio::test]
async fn new_rejects_invalid_names() {
    let dir = project_dir();
    let args = NewArgs {
        name: "Bad Name".to_string(),
    };
    let err = execute(&args, &global_for(&dir)).await.unwrap_err();
    assert!(err.to_string().contains("Invalid migration name"));
}
