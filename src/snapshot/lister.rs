use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use object_store::ObjectStore;
use tokio_stream::StreamExt;

use crate::conf::Deployment;
use crate::core::SnapwatchError;

use super::name::{SnapshotId, snapshot_from_key};

/// Lists the snapshot identifiers present in one day partition.
#[async_trait]
pub trait SnapshotLister: Send + Sync {
    async fn list(&self, partition: NaiveDate) -> Result<BTreeSet<SnapshotId>, SnapwatchError>;
}

/// Lister over any ObjectStore. Pagination is handled by the store's list stream.
pub struct ObjectStoreLister {
    store: Arc<dyn ObjectStore>,
    deployment: Deployment,
}

impl ObjectStoreLister {
    pub fn new(store: Arc<dyn ObjectStore>, deployment: Deployment) -> Self {
        Self { store, deployment }
    }
}

#[async_trait]
impl SnapshotLister for ObjectStoreLister {
    async fn list(&self, partition: NaiveDate) -> Result<BTreeSet<SnapshotId>, SnapwatchError> {
        let prefix = self.deployment.partition_prefix(partition);
        log::info!(
            "Scanning s3://{}/{}/",
            self.deployment.bucket,
            prefix.as_ref()
        );

        let mut snapshots = BTreeSet::new();
        let mut objects = 0usize;
        let mut stream = self.store.list(Some(&prefix));

        while let Some(result) = stream.next().await {
            let meta = result.map_err(|e| {
                SnapwatchError::ListingError(format!("listing {}: {}", prefix.as_ref(), e))
            })?;
            objects += 1;
            if let Some(id) = snapshot_from_key(meta.location.as_ref()) {
                snapshots.insert(id);
            }
        }

        log::debug!(
            "Partition {}: {} objects, {} snapshots",
            partition,
            objects,
            snapshots.len()
        );

        Ok(snapshots)
    }
}
