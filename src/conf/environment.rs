use chrono::NaiveDate;
use object_store::path::Path as ObjectPath;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::conf::Config;
use crate::core::SnapwatchError::{self, ConfigParsingError};

const EU_REGION: &str = "eu-central-1";
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Explicit environment name; wins over anything derived from the ARN.
    #[serde(default)]
    pub name: Option<String>,
    /// Caller identity ARN, e.g. the role the job runs under.
    #[serde(default)]
    pub caller_arn: Option<String>,
    /// Regex with one capture group that extracts the environment from the ARN.
    #[serde(default = "EnvironmentConfig::default_arn_pattern")]
    pub arn_pattern: String,
}

impl EnvironmentConfig {
    fn default_arn_pattern() -> String {
        String::from(r"us-east-1-(.*?)-HBase")
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: None,
            caller_arn: None,
            arn_pattern: Self::default_arn_pattern(),
        }
    }
}

/// Everything derived from the environment name, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Deployment {
    pub environment: String,
    pub region: String,
    pub bucket: String,
    pub cluster: String,
    pub metadata_prefix: String,
}

impl Deployment {
    pub fn resolve(config: &Config) -> Result<Self, SnapwatchError> {
        let environment = environment_name(&config.environment)?;

        let region = config
            .storage
            .region
            .clone()
            .unwrap_or_else(|| region_for(&environment).to_string());
        let bucket = config.storage.bucket_template.replace("{env}", &environment);
        let cluster = config.storage.cluster_template.replace("{env}", &environment);
        let metadata_prefix = config
            .monitor
            .metadata_prefix
            .clone()
            .unwrap_or_else(|| format!("{}/hbase/snapshot_monitor", cluster));

        Ok(Self {
            environment,
            region,
            bucket,
            cluster,
            metadata_prefix,
        })
    }

    pub fn baseline_key(&self) -> String {
        format!("{}/baseline.json", self.metadata_prefix.trim_end_matches('/'))
    }

    pub fn history_key(&self) -> String {
        format!(
            "{}/missing_history.json",
            self.metadata_prefix.trim_end_matches('/')
        )
    }

    /// Listing prefix of one day's snapshots: `<cluster>/hbase/<YYYYMMDD>/.hbase-snapshot`.
    pub fn partition_prefix(&self, date: NaiveDate) -> ObjectPath {
        ObjectPath::from(format!(
            "{}/hbase/{}/.hbase-snapshot",
            self.cluster,
            date.format("%Y%m%d")
        ))
    }
}

fn environment_name(config: &EnvironmentConfig) -> Result<String, SnapwatchError> {
    if let Some(name) = config.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        return Ok(name.to_string());
    }

    let arn = config.caller_arn.as_deref().ok_or_else(|| {
        ConfigParsingError(
            "cannot determine environment: set environment.name or environment.caller_arn"
                .to_string(),
        )
    })?;

    let pattern = Regex::new(&config.arn_pattern).map_err(|e| {
        ConfigParsingError(format!("invalid arn_pattern '{}': {}", config.arn_pattern, e))
    })?;

    pattern
        .captures(arn)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            ConfigParsingError(format!(
                "caller arn '{}' does not match pattern '{}'",
                arn, config.arn_pattern
            ))
        })
}

fn region_for(environment: &str) -> &'static str {
    if environment.to_lowercase().contains("eu") {
        EU_REGION
    } else {
        DEFAULT_REGION
    }
}
