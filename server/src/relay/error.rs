//! Relay error type and its HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Result type alias using `RelayError`.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Failures while relaying a submission.
///
/// `Display` is the operator-facing message written to the log;
/// [`RelayError::public_message`] is what the browser receives.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Credential for the active provider is missing.
    #[error("environment variable {0} is not set")]
    NotConfigured(&'static str),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("request body exceeds {0} bytes")]
    TooLarge(usize),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Provider answered with a non-2xx status.
    #[error("provider returned {status}: {body}")]
    Downstream { status: StatusCode, body: Value },

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::InvalidBody(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Build a downstream error from a raw status code.
    pub fn downstream(status: u16, body: Value) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
        Self::Downstream { status, body }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::InvalidBody(_) | RelayError::MissingFields(_) => StatusCode::BAD_REQUEST,
            RelayError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Downstream { status, .. } => *status,
            RelayError::Transport(_) | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the visitor. Never names the provider.
    pub fn public_message(&self) -> String {
        match self {
            RelayError::MethodNotAllowed => {
                "Méthode non autorisée. Seules les requêtes POST sont acceptées.".to_string()
            }
            RelayError::NotConfigured(_) => {
                "Le service d'envoi n'est pas configuré correctement.".to_string()
            }
            RelayError::InvalidBody(_) => "Corps de la requête manquant ou invalide.".to_string(),
            RelayError::TooLarge(_) => {
                "La requête est trop volumineuse (10 Mo maximum).".to_string()
            }
            RelayError::MissingFields(fields) => {
                format!("Champs requis manquants : {}.", fields.join(", "))
            }
            RelayError::Downstream { .. } => {
                "Une erreur est survenue lors de l'envoi du formulaire. Veuillez réessayer."
                    .to_string()
            }
            RelayError::Transport(_) | RelayError::Internal(_) => {
                "Une erreur interne est survenue sur le serveur.".to_string()
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "relay failed");
        } else {
            tracing::warn!(error = %self, %status, "relay rejected request");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
