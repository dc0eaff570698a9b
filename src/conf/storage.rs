use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Bucket name; `{env}` is replaced with the resolved environment.
    #[serde(default = "StorageConfig::default_bucket_template")]
    pub bucket_template: String,
    /// HBase cluster directory at the bucket root; `{env}` is substituted too.
    #[serde(default = "StorageConfig::default_cluster_template")]
    pub cluster_template: String,
    #[serde(default)]
    pub region: Option<String>,
    /// Custom S3 endpoint (MinIO, LocalStack, ...).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Read snapshots from a local directory instead of S3.
    #[serde(default)]
    pub local_root: Option<String>,
    #[serde(
        with = "humantime_serde",
        default = "StorageConfig::default_request_timeout"
    )]
    pub request_timeout: Duration,
}

impl StorageConfig {
    fn default_bucket_template() -> String {
        String::from("mlife-cdp-{env}-backup")
    }

    fn default_cluster_template() -> String {
        String::from("cod-{env}-hdfs")
    }

    fn default_request_timeout() -> Duration {
        Duration::from_secs(30)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_template: Self::default_bucket_template(),
            cluster_template: Self::default_cluster_template(),
            region: None,
            endpoint: None,
            local_root: None,
            request_timeout: Self::default_request_timeout(),
        }
    }
}
