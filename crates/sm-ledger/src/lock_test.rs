use super::*;
use crate::ledger::Ledger;
use sm_db::DuckDbBackend;

async fn locked_db() -> Arc<dyn Database> {
    let db: Arc<dyn Database> = Arc::new(DuckDbBackend::in_memory().unwrap());
    Ledger::new(Arc::clone(&db)).ensure().await.unwrap();
    db
}

fn fast_settings() -> LockSettings {
    LockSettings {
        timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(25),
    }
}

#[tokio::test]
async fn acquire_release_reacquire() {
    let db = locked_db().await;

    let lock = EngineLock::new(Arc::clone(&db));
    let guard = lock.acquire(&fast_settings()).await.unwrap();
    guard.release().await.unwrap();

    let lock2 = EngineLock::new(db);
    let guard2 = lock2.acquire(&fast_settings()).await.unwrap();
    guard2.release().await.unwrap();
}

#[tokio::test]
async fn contended_acquire_times_out_with_holder() {
    let db = locked_db().await;

    let first = EngineLock::new(Arc::clone(&db));
    let guard = first.acquire(&fast_settings()).await.unwrap();

    let second = EngineLock::new(Arc::clone(&db));
    let err = second.acquire(&fast_settings()).await.unwrap_err();
    match err {
        LedgerError::LockTimeout { holder, .. } => assert_eq!(holder, first.holder()),
        other => panic!("expected LockTimeout, got: {other}"),
    }

    guard.release().await.unwrap();
}

#[tokio::test]
async fn waiting_acquire_succeeds_after_release() {
    let db = locked_db().await;

    let first = EngineLock::new(Arc::clone(&db));
    let guard = first.acquire(&fast_settings()).await.unwrap();

    let waiter_db = Arc::clone(&db);
    let waiter = tokio::spawn(async move {
        let lock = EngineLock::new(waiter_db);
        let settings = LockSettings {
            timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(25),
        };
        lock.acquire(&settings).await
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    guard.release().await.unwrap();

    let guard2 = waiter.await.unwrap().unwrap();
    guard2.release().await.unwrap();
}

#[tokio::test]
async fn dropped_guard_leaves_lock_held() {
    let db = locked_db().await;

    let first = EngineLock::new(Arc::clone(&db));
    let guard = first.acquire(&fast_settings()).await.unwrap();
    drop(guard); // no release, simulating a crashed run

    let second = EngineLock::new(db);
    let err = second.acquire(&fast_settings()).await.unwrap_err();
    assert!(matches!(err, LedgerError::LockTimeout { .. }), "got: {err}");
}

#[tokio::test]
async fn release_only_deletes_own_row() {
    let db = locked_db().await;

    let first = EngineLock::new(Arc::clone(&db));
    let guard = first.acquire(&fast_settings()).await.unwrap();

    // A stale guard from another holder must not free the current lock
    let stale = LockGuard {
        db: Arc::clone(&db),
        holder: "someone-else".to_string(),
        released: false,
    };
    stale.release().await.unwrap();

    let second = EngineLock::new(Arc::clone(&db));
    assert!(second.acquire(&fast_settings()).await.is_err());

    guard.release().await.unwrap();
}
