//! Brevo transactional email API.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

use super::{DownstreamReply, RelayMessage, RelaySender, Result, send_json};
use crate::config::{Provider, RelayConfig};

pub const BREVO_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Clone)]
pub struct BrevoSender {
    client: reqwest::Client,
    url: String,
    sender_name: String,
    sender_email: String,
    recipient_email: String,
}

impl BrevoSender {
    pub fn new(client: reqwest::Client, config: &RelayConfig) -> Self {
        Self {
            client,
            url: BREVO_URL.to_string(),
            sender_name: config.sender_name.clone(),
            sender_email: config.sender_email.clone(),
            recipient_email: config.recipient_email.clone(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn body(&self, message: &RelayMessage) -> Value {
        let payload = &message.payload;
        let mut body = json!({
            "sender": { "name": self.sender_name, "email": self.sender_email },
            "to": [{ "email": self.recipient_email, "name": self.sender_name }],
            "replyTo": { "email": payload.email, "name": payload.name },
            "subject": payload.subject,
            "htmlContent": payload.html_content,
        });

        if !message.attachments.is_empty() {
            let attachments: Vec<Value> = message
                .attachments
                .iter()
                .map(|a| json!({ "name": a.filename, "content": STANDARD.encode(&a.data) }))
                .collect();
            body["attachment"] = Value::Array(attachments);
        }

        body
    }
}

#[async_trait]
impl RelaySender for BrevoSender {
    fn provider(&self) -> Provider {
        Provider::Brevo
    }

    async fn send(&self, credential: &str, message: &RelayMessage) -> Result<DownstreamReply> {
        let request = self.client.post(&self.url).header("api-key", credential);
        send_json(request, &self.body(message)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::stub;
    use axum::http::StatusCode;
    use telya_core::{Attachment, EmailPayload};

    fn config() -> RelayConfig {
        RelayConfig {
            provider: Provider::Brevo,
            sender_name: "Telya Agency".to_string(),
            sender_email: "site@telyaagency.com".to_string(),
            recipient_email: "contact@telyaagency.com".to_string(),
            ..RelayConfig::default()
        }
    }

    fn message(attachments: Vec<Attachment>) -> RelayMessage {
        RelayMessage {
            payload: EmailPayload {
                name: "Youssef".to_string(),
                email: "youssef@example.com".to_string(),
                subject: "Nouveau message".to_string(),
                html_content: "<p>Salut</p>".to_string(),
                ..EmailPayload::default()
            },
            attachments,
        }
    }

    #[test]
    fn test_body_without_attachment() {
        let sender = BrevoSender::new(reqwest::Client::new(), &config());
        let body = sender.body(&message(Vec::new()));

        assert_eq!(body["sender"]["email"], "site@telyaagency.com");
        assert_eq!(body["to"][0]["email"], "contact@telyaagency.com");
        assert_eq!(body["replyTo"]["email"], "youssef@example.com");
        assert_eq!(body["replyTo"]["name"], "Youssef");
        assert_eq!(body["subject"], "Nouveau message");
        assert_eq!(body["htmlContent"], "<p>Salut</p>");
        assert!(body.get("attachment").is_none());
    }

    #[test]
    fn test_body_encodes_attachment_as_base64() {
        let sender = BrevoSender::new(reqwest::Client::new(), &config());
        let attachment = Attachment {
            filename: "brief.txt".to_string(),
            content_type: "text/plain".to_string(),
            data: b"hello".to_vec(),
        };
        let body = sender.body(&message(vec![attachment]));

        let attachments = body["attachment"].as_array().unwrap();
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0]["name"], "brief.txt");
        assert_eq!(attachments[0]["content"], "aGVsbG8=");
    }

    #[tokio::test]
    async fn test_sends_api_key_and_base64_attachment() {
        let stub = stub::spawn(StatusCode::CREATED, json!({ "messageId": "<1@brevo>" })).await;
        let sender = BrevoSender::new(reqwest::Client::new(), &config())
            .with_base_url(format!("{}/v3/smtp/email", stub.url));

        let attachment = Attachment {
            filename: "brief.txt".to_string(),
            content_type: "text/plain".to_string(),
            data: b"hello".to_vec(),
        };
        let reply = sender
            .send("xkeysib-test", &message(vec![attachment]))
            .await
            .unwrap();
        assert_eq!(reply.status, 201);
        assert_eq!(reply.body["messageId"], "<1@brevo>");

        let request = &stub.requests()[0];
        assert_eq!(request.path, "/v3/smtp/email");
        assert_eq!(request.headers["api-key"], "xkeysib-test");
        assert_eq!(request.body["attachment"][0]["name"], "brief.txt");
        assert_eq!(request.body["attachment"][0]["content"], "aGVsbG8=");
    }
}
