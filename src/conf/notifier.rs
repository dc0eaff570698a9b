use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NotifierConfig {
    /// Teams workflow webhook. Without it alerts only go to the log.
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(with = "humantime_serde", default = "NotifierConfig::default_timeout")]
    pub timeout: Duration,
}

impl NotifierConfig {
    fn default_timeout() -> Duration {
        Duration::from_secs(10)
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout: Self::default_timeout(),
        }
    }
}
