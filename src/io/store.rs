use std::sync::Arc;

use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::{ClientOptions, ObjectStore};

use crate::conf::{Deployment, StorageConfig};
use crate::core::SnapwatchError;

/// Local filesystem store rooted at `storage.local_root`, or S3 otherwise.
pub fn create_store(
    config: &StorageConfig,
    deployment: &Deployment,
) -> Result<Arc<dyn ObjectStore>, SnapwatchError> {
    match &config.local_root {
        Some(root) => create_local_store(root),
        None => create_s3_store(config, deployment),
    }
}

/// Creates a LocalFileSystem ObjectStore; keys are relative to `root`.
pub fn create_local_store(root: &str) -> Result<Arc<dyn ObjectStore>, SnapwatchError> {
    let store = LocalFileSystem::new_with_prefix(root).map_err(|e| {
        SnapwatchError::ConfigParsingError(format!("invalid local_root '{}': {}", root, e))
    })?;
    Ok(Arc::new(store))
}

/// Creates an S3 ObjectStore for the deployment's bucket and region.
pub fn create_s3_store(
    config: &StorageConfig,
    deployment: &Deployment,
) -> Result<Arc<dyn ObjectStore>, SnapwatchError> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(&deployment.bucket)
        .with_region(&deployment.region)
        .with_client_options(ClientOptions::new().with_timeout(config.request_timeout));

    // Optional custom endpoint (for MinIO, LocalStack, etc.)
    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
        if endpoint.starts_with("http://") {
            builder = builder.with_allow_http(true);
        }
    }

    let store = builder.build().map_err(|e| {
        SnapwatchError::ConfigParsingError(format!(
            "Failed to create S3 store for bucket '{}': {}",
            deployment.bucket, e
        ))
    })?;

    Ok(Arc::new(store))
}
