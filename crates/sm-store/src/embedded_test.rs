use super::*;

static MANIFEST: &[EmbeddedMigration] = &[
    EmbeddedMigration {
        version: 2,
        name: "add_index",
        sql: "CREATE INDEX i ON a (id);",
    },
    EmbeddedMigration {
        version: 1,
        name: "initial",
        sql: "CREATE TABLE a (id INTEGER);",
    },
];

#[test]
fn list_orders_manifest_by_version() {
    let units = EmbeddedSource::new(MANIFEST).list().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].label(), "v0001_initial");
    assert_eq!(units[1].label(), "v0002_add_index");
    assert!(units.iter().all(|u| u.path.is_none()));
}

#[test]
fn duplicate_manifest_versions_are_rejected() {
    static DUP: &[EmbeddedMigration] = &[
        EmbeddedMigration {
            version: 1,
            name: "one",
            sql: "CREATE TABLE a (id INTEGER);",
        },
        EmbeddedMigration {
            version: 1,
            name: "other",
            sql: "CREATE TABLE b (id INTEGER);",
        },
    ];
    let err = EmbeddedSource::new(DUP).list().unwrap_err();
    assert!(err.to_string().contains("S003"), "got: {err}");
}

#[test]
fn invalid_manifest_name_is_malformed() {
    static BAD: &[EmbeddedMigration] = &[EmbeddedMigration {
        version: 1,
        name: "Bad Name",
        sql: "CREATE TABLE a (id INTEGER);",
    }];
    let err = EmbeddedSource::new(BAD).list().unwrap_err();
    assert!(err.to_string().contains("S002"), "got: {err}");
}

#[test]
fn describe_reports_unit_count() {
    assert_eq!(
        EmbeddedSource::new(MANIFEST).describe(),
        "embedded manifest (2 units)"
    );
}
