use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::core::SnapwatchError;

use super::{Alert, Notifier, NotifyError};

/// Posts alerts as an adaptive card to a Teams workflow webhook.
pub struct TeamsNotifier {
    client: reqwest::Client,
    url: String,
    environment: String,
}

impl TeamsNotifier {
    pub fn new(url: String, environment: String, timeout: Duration) -> Result<Self, SnapwatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SnapwatchError::ConfigParsingError(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            url,
            environment,
        })
    }

    fn payload(&self, alert: &Alert) -> Value {
        card_payload(alert, &self.environment)
    }
}

pub(crate) fn card_payload(alert: &Alert, environment: &str) -> Value {
    json!({
        "type": "message",
        "attachments": [
            {
                "contentType": "application/vnd.microsoft.card.adaptive",
                "content": {
                    "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
                    "type": "AdaptiveCard",
                    "version": "1.5",
                    "body": [
                        {
                            "type": "TextBlock",
                            "text": alert.title,
                            "weight": "Bolder",
                            "size": "Large",
                            "color": alert.severity.as_str(),
                        },
                        {
                            "type": "TextBlock",
                            "text": format!("**Environment:** {}", environment),
                            "wrap": true,
                        },
                        {"type": "TextBlock", "text": alert.body, "wrap": true},
                    ]
                }
            }
        ]
    })
}

#[async_trait]
impl Notifier for TeamsNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(&self.payload(alert))
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 && status != 202 {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Status { status, body });
        }

        log::info!("Teams alert sent: {}", alert.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    #[test]
    fn test_card_payload_shape() {
        let alert = Alert {
            title: "[dev] Snapshot Alert".to_string(),
            body: "**Missing Tables (count):** 1".to_string(),
            severity: Severity::Attention,
        };
        let payload = card_payload(&alert, "dev");

        let content = &payload["attachments"][0]["content"];
        assert_eq!(content["type"], "AdaptiveCard");
        assert_eq!(content["version"], "1.5");
        let body = content["body"].as_array().unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0]["text"], "[dev] Snapshot Alert");
        assert_eq!(body[0]["color"], "Attention");
        assert_eq!(body[1]["text"], "**Environment:** dev");
        assert_eq!(body[2]["text"], "**Missing Tables (count):** 1");
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_error() {
        let notifier = TeamsNotifier::new(
            "http://127.0.0.1:9/hook".to_string(),
            "dev".to_string(),
            Duration::from_millis(500),
        )
        .unwrap();
        let alert = Alert {
            title: "t".to_string(),
            body: "b".to_string(),
            severity: Severity::Good,
        };
        assert!(matches!(
            notifier.send(&alert).await,
            Err(NotifyError::Request(_))
        ));
    }
}
