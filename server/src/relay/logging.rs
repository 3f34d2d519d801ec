//! Log-only fallback used in development.

use async_trait::async_trait;
use serde_json::json;

use super::{DownstreamReply, RelayMessage, RelaySender, Result};
use crate::config::Provider;

/// Writes the submission to the log and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSender;

#[async_trait]
impl RelaySender for LogSender {
    fn provider(&self) -> Provider {
        Provider::Log
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &[]
    }

    async fn send(&self, _credential: &str, message: &RelayMessage) -> Result<DownstreamReply> {
        let payload = &message.payload;
        tracing::info!(
            name = %payload.name,
            email = %payload.email,
            subject = %payload.subject,
            attachments = message.attachments.len(),
            "submission received (log provider, nothing sent)"
        );
        tracing::debug!(html = %payload.html_content, "submission body");

        Ok(DownstreamReply {
            status: 200,
            body: json!({ "provider": "log" }),
        })
    }
}
