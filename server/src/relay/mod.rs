//! Downstream providers for the form relay.
//!
//! Exactly one [`RelaySender`] is active per deployment, picked from
//! `[relay].provider` at startup.

mod brevo;
mod error;
mod formspark;
mod logging;
mod resend;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use telya_core::{Attachment, EmailPayload};

pub use brevo::BrevoSender;
pub use error::{RelayError, Result};
pub use formspark::FormsparkSender;
pub use logging::LogSender;
pub use resend::ResendSender;

use crate::config::{Provider, RelayConfig};

/// A validated submission ready to forward.
#[derive(Debug, Clone, Default)]
pub struct RelayMessage {
    pub payload: EmailPayload,
    pub attachments: Vec<Attachment>,
}

/// Status and decoded body returned by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DownstreamReply {
    pub status: u16,
    pub body: Value,
}

impl DownstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body on 2xx, [`RelayError::Downstream`] otherwise.
    pub fn into_result(self) -> Result<Value> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(RelayError::downstream(self.status, self.body))
        }
    }
}

/// Forwards a submission to one downstream service.
#[async_trait]
pub trait RelaySender: Send + Sync {
    fn provider(&self) -> Provider;

    /// Payload fields that must be non-blank before [`RelaySender::send`]
    /// is called. Email APIs need the full envelope; form intakes take
    /// whatever the page sent.
    fn required_fields(&self) -> &'static [&'static str] {
        EmailPayload::EMAIL_FIELDS
    }

    /// Forward `message` using `credential` (empty for providers without one).
    async fn send(&self, credential: &str, message: &RelayMessage) -> Result<DownstreamReply>;
}

/// Sender named by `config.provider`, honoring an endpoint override.
pub fn build_sender(config: &RelayConfig, client: reqwest::Client) -> Arc<dyn RelaySender> {
    let endpoint = config.endpoint.as_deref();
    match config.provider {
        Provider::Formspark => {
            let sender = FormsparkSender::new(client);
            Arc::new(match endpoint {
                Some(url) => sender.with_base_url(url),
                None => sender,
            })
        }
        Provider::Brevo => {
            let sender = BrevoSender::new(client, config);
            Arc::new(match endpoint {
                Some(url) => sender.with_base_url(url),
                None => sender,
            })
        }
        Provider::Resend => {
            let sender = ResendSender::new(client, config);
            Arc::new(match endpoint {
                Some(url) => sender.with_base_url(url),
                None => sender,
            })
        }
        Provider::Log => Arc::new(LogSender),
    }
}

/// Send a JSON request and decode whatever comes back.
///
/// Non-JSON bodies are kept as a string so they can still be logged.
pub(crate) async fn send_json(
    request: reqwest::RequestBuilder,
    body: &Value,
) -> Result<DownstreamReply> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status().as_u16();
    let text = response.text().await?;
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };

    tracing::debug!(status, "provider responded");
    Ok(DownstreamReply { status, body })
}
