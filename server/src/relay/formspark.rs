//! Formspark form endpoint.

use async_trait::async_trait;

use super::{DownstreamReply, RelayError, RelayMessage, RelaySender, Result, send_json};
use crate::config::Provider;

pub const FORMSPARK_URL: &str = "https://submit-form.com";

/// Posts every submitted field as JSON to `<base>/<form id>`.
///
/// Formspark's JSON intake has no file support, so attachments are dropped.
#[derive(Debug, Clone)]
pub struct FormsparkSender {
    client: reqwest::Client,
    base_url: String,
}

impl FormsparkSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: FORMSPARK_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl RelaySender for FormsparkSender {
    fn provider(&self) -> Provider {
        Provider::Formspark
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[]
    }

    async fn send(&self, credential: &str, message: &RelayMessage) -> Result<DownstreamReply> {
        if !message.attachments.is_empty() {
            tracing::warn!(
                count = message.attachments.len(),
                "formspark does not accept attachments; dropping them"
            );
        }

        let body = serde_json::to_value(&message.payload)
            .map_err(|e| RelayError::internal(format!("failed to encode payload: {e}")))?;
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), credential);

        send_json(self.client.post(url), &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::stub;
    use axum::http::StatusCode;
    use serde_json::json;
    use telya_core::EmailPayload;

    fn message() -> RelayMessage {
        let mut payload = EmailPayload {
            name: "Amel".to_string(),
            email: "amel@example.com".to_string(),
            subject: "Devis".to_string(),
            html_content: "<p>Bonjour</p>".to_string(),
            company_name: Some("Hôtel Sidi Bou".to_string()),
            ..EmailPayload::default()
        };
        payload.extra.insert("budget".to_string(), json!("1000-2500€"));
        RelayMessage {
            payload,
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_posts_all_fields_to_form_id() {
        let stub = stub::spawn(StatusCode::OK, json!({ "ok": true })).await;
        let sender = FormsparkSender::new(reqwest::Client::new()).with_base_url(&stub.url);

        let reply = sender.send("abc123", &message()).await.unwrap();
        assert!(reply.is_success());

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/abc123");
        let body = &requests[0].body;
        assert_eq!(body["name"], "Amel");
        assert_eq!(body["htmlContent"], "<p>Bonjour</p>");
        assert_eq!(body["companyName"], "Hôtel Sidi Bou");
        assert_eq!(body["budget"], "1000-2500€");
    }

    #[tokio::test]
    async fn test_reports_downstream_status() {
        let stub = stub::spawn(StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": "bad" })).await;
        let sender = FormsparkSender::new(reqwest::Client::new()).with_base_url(&stub.url);

        let reply = sender.send("abc123", &message()).await.unwrap();
        assert_eq!(reply.status, 422);
        assert_eq!(reply.body["error"], "bad");
    }
}
