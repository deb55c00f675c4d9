use super::*;
use chrono::TimeZone;
use sm_core::{checksum_hex, UnitName};
use sm_db::DuckDbBackend;

fn db() -> Arc<dyn Database> {
    Arc::new(DuckDbBackend::in_memory().unwrap())
}

fn unit(version: u64, name: &str, sql: &str) -> MigrationUnit {
    MigrationUnit::new(
        Version::new(version),
        UnitName::new(name),
        vec![sql.to_string()],
        checksum_hex(sql),
        None,
    )
}

fn applied_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 12, 30, 0).unwrap()
}

#[tokio::test]
async fn ensure_is_idempotent() {
    let db = db();
    let ledger = Ledger::new(Arc::clone(&db));
    assert!(!ledger.is_initialized().await.unwrap());

    ledger.ensure().await.unwrap();
    ledger.ensure().await.unwrap();
    assert!(ledger.is_initialized().await.unwrap());
}

#[tokio::test]
async fn records_empty_without_storage() {
    let ledger = Ledger::new(db());
    // No ensure(): a read-only inspection of a fresh database
    assert!(ledger.records().await.unwrap().is_empty());
    assert!(ledger.applied_versions().await.unwrap().is_empty());
}

#[tokio::test]
async fn record_and_read_back() {
    let ledger = Ledger::new(db());
    ledger.ensure().await.unwrap();

    let u = unit(3, "add_index", "CREATE INDEX i ON t (c);");
    ledger.record(&u, applied_at()).await.unwrap();

    let records = ledger.records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].version, Version::new(3));
    assert_eq!(records[0].name, "add_index");
    assert_eq!(records[0].checksum, u.checksum);
    assert_eq!(records[0].applied_at, applied_at());
}

#[tokio::test]
async fn records_are_ordered_by_version() {
    let ledger = Ledger::new(db());
    ledger.ensure().await.unwrap();

    for v in [5, 1, 3] {
        ledger
            .record(&unit(v, "step", "SELECT 1"), applied_at())
            .await
            .unwrap();
    }

    let versions: Vec<u64> = ledger
        .records()
        .await
        .unwrap()
        .iter()
        .map(|r| r.version.value())
        .collect();
    assert_eq!(versions, vec![1, 3, 5]);
}

#[tokio::test]
async fn duplicate_record_is_rejected() {
    let ledger = Ledger::new(db());
    ledger.ensure().await.unwrap();

    let u = unit(1, "initial", "CREATE TABLE t (id INTEGER);");
    ledger.record(&u, applied_at()).await.unwrap();

    let err = ledger.record(&u, applied_at()).await.unwrap_err();
    assert!(
        matches!(err, LedgerError::AlreadyRecorded { version } if version == Version::new(1)),
        "got: {err}"
    );
}

#[tokio::test]
async fn verify_checksum_detects_drift() {
    let ledger = Ledger::new(db());
    ledger.ensure().await.unwrap();

    let original = unit(1, "initial", "CREATE TABLE t (id INTEGER);");
    ledger.record(&original, applied_at()).await.unwrap();

    assert!(ledger.verify_checksum(&original).await.unwrap());

    let edited = unit(1, "initial", "CREATE TABLE t (id BIGINT);");
    assert!(!ledger.verify_checksum(&edited).await.unwrap());

    // Never-recorded units trivially verify
    let unrecorded = unit(9, "future", "SELECT 1");
    assert!(ledger.verify_checksum(&unrecorded).await.unwrap());
}

#[tokio::test]
async fn verify_all_reports_mismatch_and_missing_source() {
    let ledger = Ledger::new(db());
    ledger.ensure().await.unwrap();

    let kept = unit(1, "kept", "CREATE TABLE a (id INTEGER);");
    let edited_v2 = unit(2, "edited", "CREATE TABLE b (id INTEGER);");
    let orphan = unit(3, "orphan", "CREATE TABLE c (id INTEGER);");
    for u in [&kept, &edited_v2, &orphan] {
        ledger.record(u, applied_at()).await.unwrap();
    }

    // Store now sees: kept unchanged, v2 with different content, v3 gone
    let store_units = vec![
        kept.clone(),
        unit(2, "edited", "CREATE TABLE b (id BIGINT);"),
    ];
    let drift = ledger.verify_all(&store_units).await.unwrap();

    assert_eq!(drift.len(), 2);
    assert!(matches!(
        &drift[0],
        Drift::ChecksumMismatch { version, .. } if *version == Version::new(2)
    ));
    assert!(matches!(
        &drift[1],
        Drift::MissingSource { version, name } if *version == Version::new(3) && name == "orphan"
    ));
}
