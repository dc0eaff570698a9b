use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::ObjectStore;
use object_store::path::Path as ObjectPath;

use crate::core::SnapwatchError;

/// Key-value blob storage. A missing key is `Ok(None)`, not an error.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, SnapwatchError>;
    async fn put(&self, key: &str, data: Bytes) -> Result<(), SnapwatchError>;
}

pub struct ObjectStoreBlobStore {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreBlobStore {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BlobStore for ObjectStoreBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, SnapwatchError> {
        let path = ObjectPath::from(key);
        match self.store.get(&path).await {
            Ok(result) => Ok(Some(result.bytes().await?)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(SnapwatchError::StorageError(format!("reading {}: {}", key, e))),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> Result<(), SnapwatchError> {
        let path = ObjectPath::from(key);
        self.store
            .put(&path, data.into())
            .await
            .map_err(|e| SnapwatchError::StorageError(format!("writing {}: {}", key, e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let blobs = ObjectStoreBlobStore::new(Arc::new(InMemory::new()));
        assert_eq!(blobs.get("nope/baseline.json").await, Ok(None));
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let blobs = ObjectStoreBlobStore::new(Arc::new(InMemory::new()));
        blobs
            .put("meta/state.json", Bytes::from_static(b"[\"a\"]"))
            .await
            .unwrap();
        let data = blobs.get("meta/state.json").await.unwrap().unwrap();
        assert_eq!(&data[..], b"[\"a\"]");
    }
}
