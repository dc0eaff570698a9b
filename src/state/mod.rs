mod blob;

pub use blob::{BlobStore, ObjectStoreBlobStore};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;

use crate::conf::Deployment;
use crate::core::SnapwatchError;

/// Table names expected to produce a snapshot every window.
pub type Baseline = BTreeSet<String>;

/// Table name to number of consecutive windows it has been missing.
pub type MissingHistory = BTreeMap<String, u32>;

/// Typed access to the two JSON state blobs.
pub struct StateStore {
    blobs: Arc<dyn BlobStore>,
    baseline_key: String,
    history_key: String,
}

impl StateStore {
    pub fn new(blobs: Arc<dyn BlobStore>, baseline_key: String, history_key: String) -> Self {
        Self {
            blobs,
            baseline_key,
            history_key,
        }
    }

    pub fn for_deployment(blobs: Arc<dyn BlobStore>, deployment: &Deployment) -> Self {
        Self::new(blobs, deployment.baseline_key(), deployment.history_key())
    }

    /// None means no baseline was ever written.
    pub async fn load_baseline(&self) -> Result<Option<Baseline>, SnapwatchError> {
        let Some(data) = self.blobs.get(&self.baseline_key).await? else {
            return Ok(None);
        };
        let names: Vec<String> = decode(&self.baseline_key, &data)?;
        Ok(Some(names.into_iter().collect()))
    }

    pub async fn save_baseline(&self, baseline: &Baseline) -> Result<(), SnapwatchError> {
        self.blobs
            .put(&self.baseline_key, encode(&self.baseline_key, baseline)?)
            .await
    }

    /// Absent history is empty history.
    pub async fn load_history(&self) -> Result<MissingHistory, SnapwatchError> {
        match self.blobs.get(&self.history_key).await? {
            Some(data) => decode(&self.history_key, &data),
            None => Ok(MissingHistory::new()),
        }
    }

    pub async fn save_history(&self, history: &MissingHistory) -> Result<(), SnapwatchError> {
        self.blobs
            .put(&self.history_key, encode(&self.history_key, history)?)
            .await
    }
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, data: &[u8]) -> Result<T, SnapwatchError> {
    serde_json::from_slice(data)
        .map_err(|e| SnapwatchError::StateError(format!("parsing {}: {}", key, e)))
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Bytes, SnapwatchError> {
    serde_json::to_vec_pretty(value)
        .map(Bytes::from)
        .map_err(|e| SnapwatchError::StateError(format!("encoding {}: {}", key, e)))
}
