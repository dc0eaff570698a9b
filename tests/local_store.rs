use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use snapwatch::conf::{Config, Deployment};
use snapwatch::io::create_store;
use snapwatch::monitor::Monitor;
use snapwatch::snapshot::ObjectStoreLister;
use snapwatch::state::{ObjectStoreBlobStore, StateStore};
use snapwatch::testutil::RecordingNotifier;

fn touch(root: &std::path::Path, rel: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"x").unwrap();
}

#[tokio::test]
async fn test_run_against_local_directory() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let snapshots = "cod-qa-hdfs/hbase/20251008/.hbase-snapshot";
    touch(root, &format!("{snapshots}/orders_SNAPSHOT_202510081140/.snapshotinfo"));
    touch(root, &format!("{snapshots}/orders_SNAPSHOT_202510081140/data.manifest"));
    touch(root, &format!("{snapshots}/users_SNAPSHOT_202510080300/.snapshotinfo"));

    let toml = format!(
        r#"
        [environment]
        name = "qa"

        [storage]
        local_root = "{}"
        "#,
        root.display()
    );
    let config = Config::from_str(&toml).unwrap();
    let deployment = Deployment::resolve(&config).unwrap();
    let store = create_store(&config.storage, &deployment).unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let state = StateStore::for_deployment(
        Arc::new(ObjectStoreBlobStore::new(store.clone())),
        &deployment,
    );
    let monitor = Monitor::new(
        deployment.clone(),
        state,
        Arc::new(ObjectStoreLister::new(store, deployment.clone())),
        notifier.clone(),
        &config.monitor,
    )
    .unwrap();

    let now = Utc.with_ymd_and_hms(2025, 10, 8, 12, 0, 0).unwrap();
    let report = monitor.run(now).await.unwrap();

    assert!(report.bootstrapped);
    assert_eq!(report.reconciliation.missing, vec!["users"]);
    assert!(
        root.join("cod-qa-hdfs/hbase/snapshot_monitor/baseline.json")
            .exists()
    );
    assert!(
        root.join("cod-qa-hdfs/hbase/snapshot_monitor/missing_history.json")
            .exists()
    );
    assert_eq!(notifier.sent().len(), 1);
}
