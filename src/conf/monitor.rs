use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::SnapwatchError::{self, ConfigParsingError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Consecutive missed windows before a table leaves the baseline.
    #[serde(default = "MonitorConfig::default_missing_threshold")]
    pub missing_threshold: u32,
    #[serde(default = "MonitorConfig::default_ignore_tables")]
    pub ignore_tables: Vec<String>,
    #[serde(with = "humantime_serde", default = "MonitorConfig::default_window")]
    pub window: Duration,
    /// Where baseline.json and missing_history.json live.
    /// Defaults to `<cluster>/hbase/snapshot_monitor`.
    #[serde(default)]
    pub metadata_prefix: Option<String>,
}

impl MonitorConfig {
    /// Longest accepted window.
    pub const MAX_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    pub fn validate(&self) -> Result<(), SnapwatchError> {
        if self.missing_threshold == 0 {
            return Err(ConfigParsingError(
                "monitor.missing_threshold must be at least 1".to_string(),
            ));
        }
        if self.window.is_zero() {
            return Err(ConfigParsingError(
                "monitor.window must be positive".to_string(),
            ));
        }
        if self.window > Self::MAX_WINDOW {
            return Err(ConfigParsingError(format!(
                "monitor.window must be at most {}s, got {}s",
                Self::MAX_WINDOW.as_secs(),
                self.window.as_secs()
            )));
        }
        Ok(())
    }

    fn default_missing_threshold() -> u32 {
        3
    }

    fn default_ignore_tables() -> Vec<String> {
        vec![String::from(".tmp")]
    }

    fn default_window() -> Duration {
        Duration::from_secs(60 * 60)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            missing_threshold: Self::default_missing_threshold(),
            ignore_tables: Self::default_ignore_tables(),
            window: Self::default_window(),
            metadata_prefix: None,
        }
    }
}
