//! Alert delivery.

mod log_notifier;
mod teams;

pub use log_notifier::LogNotifier;
pub use teams::TeamsNotifier;

use std::sync::Arc;

use async_trait::async_trait;

use crate::conf::NotifierConfig;
use crate::core::SnapwatchError;

/// Alert severity, rendered as the adaptive card title colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Attention,
    Good,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Attention => "Attention",
            Severity::Good => "Good",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Request(String),

    #[error("Webhook returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Teams notifier when a webhook is configured, otherwise the log.
pub fn from_config(
    config: &NotifierConfig,
    environment: &str,
) -> Result<Arc<dyn Notifier>, SnapwatchError> {
    match &config.webhook_url {
        Some(url) => Ok(Arc::new(TeamsNotifier::new(
            url.clone(),
            environment.to_string(),
            config.timeout,
        )?)),
        None => {
            log::warn!("No notifier.webhook_url configured; alerts will only be logged");
            Ok(Arc::new(LogNotifier))
        }
    }
}
