//! Test utilities.
//!
//! This module is only available when the `testutil` feature is enabled.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use object_store::ObjectStore;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;

use crate::conf::{Config, Deployment, EnvironmentConfig};
use crate::core::SnapwatchError;
use crate::notify::{Alert, Notifier, NotifyError};
use crate::snapshot::{SnapshotId, SnapshotLister};
use crate::state::BlobStore;

/// Deployment for environment `env` with default templates.
pub fn deployment(env: &str) -> Deployment {
    let config = Config {
        environment: EnvironmentConfig {
            name: Some(env.to_string()),
            ..EnvironmentConfig::default()
        },
        ..Config::default()
    };
    Deployment::resolve(&config).expect("test deployment resolves")
}

pub fn memory_store() -> Arc<InMemory> {
    Arc::new(InMemory::new())
}

/// Writes the objects HBase exports for one snapshot taken at `taken_at`.
pub async fn seed_snapshot(
    store: &dyn ObjectStore,
    deployment: &Deployment,
    table: &str,
    taken_at: DateTime<Utc>,
) {
    let dir = format!(
        "{}/{}_SNAPSHOT_{}",
        deployment.partition_prefix(taken_at.date_naive()).as_ref(),
        table,
        taken_at.format("%Y%m%d%H%M")
    );
    for file in [".snapshotinfo", "data.manifest"] {
        store
            .put(
                &ObjectPath::from(format!("{}/{}", dir, file)),
                Bytes::from_static(b"snapshot").into(),
            )
            .await
            .expect("seeding snapshot object");
    }
}

/// Collects every alert it is asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Alert> {
        self.sent.lock().expect("notifier lock").clone()
    }

    pub fn clear(&self) {
        self.sent.lock().expect("notifier lock").clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        self.sent.lock().expect("notifier lock").push(alert.clone());
        Ok(())
    }
}

/// Rejects every alert as if the webhook answered 500.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _alert: &Alert) -> Result<(), NotifyError> {
        Err(NotifyError::Status {
            status: 500,
            body: "unavailable".to_string(),
        })
    }
}

/// Delegates to an inner lister but fails for selected partitions.
pub struct FlakyLister<L> {
    inner: L,
    failing: BTreeSet<NaiveDate>,
}

impl<L: SnapshotLister> FlakyLister<L> {
    pub fn new(inner: L, failing: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            inner,
            failing: failing.into_iter().collect(),
        }
    }
}

#[async_trait]
impl<L: SnapshotLister> SnapshotLister for FlakyLister<L> {
    async fn list(&self, partition: NaiveDate) -> Result<BTreeSet<SnapshotId>, SnapwatchError> {
        if self.failing.contains(&partition) {
            return Err(SnapwatchError::ListingError(format!(
                "simulated failure for {}",
                partition
            )));
        }
        self.inner.list(partition).await
    }
}

/// Blob store whose reads and/or writes always fail.
pub struct BrokenBlobStore {
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub inner: Arc<dyn BlobStore>,
}

#[async_trait]
impl BlobStore for BrokenBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, SnapwatchError> {
        if self.fail_reads {
            return Err(SnapwatchError::StorageError(format!("reading {}: timed out", key)));
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<(), SnapwatchError> {
        if self.fail_writes {
            return Err(SnapwatchError::StorageError(format!("writing {}: timed out", key)));
        }
        self.inner.put(key, data).await
    }
}
