//! Resend email API.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

use super::{DownstreamReply, RelayMessage, RelaySender, Result, send_json};
use crate::config::{Provider, RelayConfig};

pub const RESEND_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone)]
pub struct ResendSender {
    client: reqwest::Client,
    url: String,
    from: String,
    to: String,
}

impl ResendSender {
    pub fn new(client: reqwest::Client, config: &RelayConfig) -> Self {
        Self {
            client,
            url: RESEND_URL.to_string(),
            from: format!("{} <{}>", config.sender_name, config.sender_email),
            to: config.recipient_email.clone(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    fn body(&self, message: &RelayMessage) -> Value {
        let payload = &message.payload;
        let mut body = json!({
            "from": self.from,
            "to": [self.to],
            "reply_to": payload.email,
            "subject": payload.subject,
            "html": payload.html_content,
        });

        if !message.attachments.is_empty() {
            body["attachments"] = message
                .attachments
                .iter()
                .map(|a| json!({ "filename": a.filename, "content": STANDARD.encode(&a.data) }))
                .collect();
        }

        body
    }
}

#[async_trait]
impl RelaySender for ResendSender {
    fn provider(&self) -> Provider {
        Provider::Resend
    }

    async fn send(&self, credential: &str, message: &RelayMessage) -> Result<DownstreamReply> {
        let request = self.client.post(&self.url).bearer_auth(credential);
        send_json(request, &self.body(message)).await
    }
}
