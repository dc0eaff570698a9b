use async_trait::async_trait;

use super::{Alert, Notifier, NotifyError, Severity};

/// Writes alerts to the log instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        match alert.severity {
            Severity::Attention => log::warn!("{}\n{}", alert.title, alert.body),
            Severity::Good => log::info!("{}\n{}", alert.title, alert.body),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notification() {
        let alert = Alert {
            title: "t".to_string(),
            body: "b".to_string(),
            severity: Severity::Attention,
        };
        assert!(LogNotifier.send(&alert).await.is_ok());
    }
}
