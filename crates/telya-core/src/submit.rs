//! Client-side submission flow: validate, post once, report.
//!
//! The HTTP client is abstracted behind [`Transport`] so the flow runs the
//! same in the browser (gloo-net) and in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::Result,
    form::{ContactForm, EmailPayload, FieldErrors, QuestionnaireForm},
};

/// Same-origin relay endpoint.
pub const RELAY_ENDPOINT: &str = "/api/send-email";

/// Direct form service endpoint used by the questionnaire.
pub const FORM_SERVICE_URL: &str = "https://formsubmit.co/ajax/telyaagency@gmail.com";

/// Shown when the server answered with an error and no message of its own.
pub const GENERIC_FAILURE: &str =
    "Une erreur est survenue lors de l'envoi du formulaire. Veuillez réessayer.";

/// Shown when no HTTP response was received at all.
pub const NETWORK_FAILURE: &str =
    "Impossible de joindre le serveur. Vérifiez votre connexion puis réessayez.";

/// What came back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// `error` string from a JSON error body, if any.
    pub error: Option<String>,
}

impl TransportResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            error: None,
        }
    }

    /// Attach a server-provided error message.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Pull the user-facing message out of a JSON error body.
pub fn error_message(body: &Value) -> Option<String> {
    body.get("error")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// HTTP client used to send submissions.
#[async_trait(?Send)]
pub trait Transport {
    /// Platform file handle sent as an attachment.
    type File;

    /// POST a JSON document.
    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse>;

    /// POST multipart form data with an optional file part named `attachment`.
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
        file: Option<&Self::File>,
    ) -> Result<TransportResponse>;
}

/// Body of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBody {
    /// JSON document (relay).
    Json(Value),
    /// Form fields (form services, uploads).
    Form(Vec<(String, String)>),
}

/// A form that can be validated and sent.
pub trait Submittable {
    /// Field-scoped validation; empty means the form may be sent.
    fn validate(&self) -> FieldErrors;

    /// Where the form is posted.
    fn endpoint(&self) -> &str;

    /// What is posted.
    fn body(&self) -> Result<SubmitBody>;
}

impl Submittable for ContactForm {
    fn validate(&self) -> FieldErrors {
        ContactForm::validate(self)
    }

    fn endpoint(&self) -> &str {
        RELAY_ENDPOINT
    }

    fn body(&self) -> Result<SubmitBody> {
        Ok(SubmitBody::Json(serde_json::to_value(self.to_payload())?))
    }
}

impl Submittable for EmailPayload {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in self.missing_fields() {
            errors.insert(field, "Ce champ est requis.");
        }
        errors
    }

    fn endpoint(&self) -> &str {
        RELAY_ENDPOINT
    }

    fn body(&self) -> Result<SubmitBody> {
        Ok(SubmitBody::Json(serde_json::to_value(self)?))
    }
}

/// Questionnaire bound to the page origin, which the form service needs for
/// its `_next` redirect.
#[derive(Debug, Clone)]
pub struct QuestionnaireSubmission<'a> {
    pub form: &'a QuestionnaireForm,
    pub origin: &'a str,
}

impl Submittable for QuestionnaireSubmission<'_> {
    fn validate(&self) -> FieldErrors {
        self.form.validate()
    }

    fn endpoint(&self) -> &str {
        FORM_SERVICE_URL
    }

    fn body(&self) -> Result<SubmitBody> {
        let next = format!("{}/thank-you", self.origin.trim_end_matches('/'));
        Ok(SubmitBody::Form(self.form.to_fields(&next)))
    }
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The server accepted the submission.
    Sent,
    /// Sending failed; the message is shown to the user.
    Failed(String),
}

/// Validate and send a form.
///
/// `on_success` runs exactly once, only after a 2xx response. Nothing is
/// sent when validation fails, and nothing is retried.
pub async fn submit<S, T>(
    form: &S,
    transport: &T,
    attachment: Option<&T::File>,
    on_success: impl FnOnce(),
) -> SubmitOutcome
where
    S: Submittable + ?Sized,
    T: Transport + ?Sized,
{
    let errors = form.validate();
    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "submission blocked by validation");
        return SubmitOutcome::Invalid(errors);
    }

    let body = match form.body() {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(error = %err, "failed to encode submission");
            return SubmitOutcome::Failed(GENERIC_FAILURE.to_string());
        }
    };

    let url = form.endpoint();
    let result = match (body, attachment) {
        (SubmitBody::Json(json), None) => transport.post_json(url, &json).await,
        (SubmitBody::Json(json), Some(file)) => {
            transport.post_form(url, &json_fields(&json), Some(file)).await
        }
        (SubmitBody::Form(fields), file) => transport.post_form(url, &fields, file).await,
    };

    match result {
        Ok(response) if response.is_success() => {
            tracing::info!(status = response.status, "submission sent");
            on_success();
            SubmitOutcome::Sent
        }
        Ok(response) => {
            tracing::warn!(status = response.status, "submission rejected");
            SubmitOutcome::Failed(
                response
                    .error
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            )
        }
        Err(err) => {
            tracing::warn!(error = %err, "submission transport failure");
            SubmitOutcome::Failed(NETWORK_FAILURE.to_string())
        }
    }
}

fn json_fields(json: &Value) -> Vec<(String, String)> {
    json.as_object()
        .map(|object| {
            object
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.clone(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}
