//! The `/api/send-email` relay endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde_json::{Map, Value, json};
use telya_core::{Attachment, EmailPayload, submit::RELAY_ENDPOINT};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{
    env::CredentialSource,
    relay::{RelayError, RelayMessage, RelaySender, Result},
};

/// Largest accepted request body, attachments included.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const SUCCESS_MESSAGE: &str = "Formulaire envoyé avec succès.";

/// Shared, immutable relay state.
#[derive(Clone)]
pub struct RelayState {
    pub sender: Arc<dyn RelaySender>,
    pub credentials: Arc<dyn CredentialSource>,
}

/// Router for the relay endpoint.
///
/// Every response, errors and preflight included, carries
/// `Access-Control-Allow-Origin: <allow_origin>`.
pub fn relay_router(state: RelayState, allow_origin: HeaderValue) -> Router {
    Router::new()
        .route(
            RELAY_ENDPOINT,
            post(send_email)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            allow_origin,
        ))
        .with_state(state)
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

async fn send_email(
    State(state): State<RelayState>,
    request: Request,
) -> Result<Json<Value>> {
    let provider = state.sender.provider();

    // Resolved before the body is read.
    let credential = match provider.credential_var() {
        Some(var) => state
            .credentials
            .get(var)
            .ok_or(RelayError::NotConfigured(var))?,
        None => String::new(),
    };

    let message = read_message(request).await?;

    let missing = message.payload.missing_among(state.sender.required_fields());
    if !missing.is_empty() {
        return Err(RelayError::MissingFields(missing));
    }

    tracing::info!(
        %provider,
        subject = %message.payload.subject,
        attachments = message.attachments.len(),
        "relaying submission"
    );

    let data = state.sender.send(&credential, &message).await?.into_result()?;

    let mut body = json!({ "success": true, "message": SUCCESS_MESSAGE });
    if !data.is_null() {
        body["data"] = data;
    }
    Ok(Json(body))
}

/// Decode a JSON or multipart body into a [`RelayMessage`].
async fn read_message(request: Request) -> Result<RelayMessage> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| body_rejection(e.status(), e.body_text()))?;
        return read_multipart(multipart).await;
    }

    let bytes = Bytes::from_request(request, &())
        .await
        .map_err(|e| body_rejection(e.status(), e.body_text()))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(RelayError::invalid_body("empty body"));
    }

    let payload: EmailPayload = serde_json::from_slice(&bytes)
        .map_err(|e| RelayError::invalid_body(e.to_string()))?;
    Ok(RelayMessage {
        payload,
        attachments: Vec::new(),
    })
}

/// Keep the size-limit rejection distinct; everything else is a bad body.
fn body_rejection(status: StatusCode, text: String) -> RelayError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        RelayError::TooLarge(MAX_BODY_BYTES)
    } else {
        RelayError::invalid_body(text)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<RelayMessage> {
    let mut fields = Map::new();
    let mut attachments = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_rejection(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);

        match filename {
            Some(filename) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| body_rejection(e.status(), e.body_text()))?;
                // An untouched file input still sends an empty part.
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                attachments.push(Attachment {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            None => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| body_rejection(e.status(), e.body_text()))?;
                fields.insert(name, Value::String(text));
            }
        }
    }

    if fields.is_empty() && attachments.is_empty() {
        return Err(RelayError::invalid_body("empty multipart body"));
    }

    let payload: EmailPayload = serde_json::from_value(Value::Object(fields))
        .map_err(|e| RelayError::invalid_body(e.to_string()))?;
    Ok(RelayMessage {
        payload,
        attachments,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::Provider,
        env::StaticCredentials,
        relay::{DownstreamReply, LogSender},
    };

    enum Behavior {
        Reply(u16, Value),
        Fail,
    }

    struct FakeSender {
        provider: Provider,
        required: &'static [&'static str],
        behavior: Behavior,
        calls: Mutex<Vec<(String, RelayMessage)>>,
    }

    impl FakeSender {
        fn new(provider: Provider, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                provider,
                required: EmailPayload::EMAIL_FIELDS,
                behavior,
                calls: Mutex::new(Vec::new()),
            })
        }

        /// Form intake that accepts any field set, like Formspark.
        fn form_intake(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                provider: Provider::Formspark,
                required: &[],
                behavior,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, RelayMessage)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RelaySender for FakeSender {
        fn provider(&self) -> Provider {
            self.provider
        }

        fn required_fields(&self) -> &'static [&'static str] {
            self.required
        }

        async fn send(&self, credential: &str, message: &RelayMessage) -> Result<DownstreamReply> {
            self.calls
                .lock()
                .unwrap()
                .push((credential.to_string(), message.clone()));
            match &self.behavior {
                Behavior::Reply(status, body) => Ok(DownstreamReply {
                    status: *status,
                    body: body.clone(),
                }),
                Behavior::Fail => Err(RelayError::internal("connection refused")),
            }
        }
    }

    fn brevo_credentials() -> Arc<StaticCredentials> {
        Arc::new(StaticCredentials::new().with("BREVO_API_KEY", "xkeysib-test"))
    }

    fn app(sender: Arc<dyn RelaySender>, credentials: Arc<dyn CredentialSource>) -> Router {
        relay_router(
            RelayState {
                sender,
                credentials,
            },
            HeaderValue::from_static("*"),
        )
    }

    fn valid_body() -> Value {
        json!({
            "name": "Amel",
            "email": "amel@example.com",
            "subject": "Nouveau message",
            "htmlContent": "<p>Bonjour</p>",
        })
    }

    fn post_json(body: &Value) -> Request {
        Request::builder()
            .method("POST")
            .uri(RELAY_ENDPOINT)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_preflight_without_credentials() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), Arc::new(StaticCredentials::new()));

        let request = Request::builder()
            .method("OPTIONS")
            .uri(RELAY_ENDPOINT)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_is_rejected() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), brevo_credentials());

        let request = Request::builder()
            .method("GET")
            .uri(RELAY_ENDPOINT)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("POST"));
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_is_generic_500() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), Arc::new(StaticCredentials::new()));

        let response = app.oneshot(post_json(&valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let error = body_json(response).await["error"].as_str().unwrap().to_string();
        assert!(!error.to_lowercase().contains("brevo"));
        assert!(!error.contains("BREVO_API_KEY"));
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_fields_are_listed() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), brevo_credentials());

        let response = app
            .oneshot(post_json(&json!({ "name": "Amel", "email": "amel@example.com" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await["error"].as_str().unwrap().to_string();
        assert!(error.contains("subject"));
        assert!(error.contains("htmlContent"));
        assert!(!error.contains("name,"));
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), brevo_credentials());

        let request = Request::builder()
            .method("POST")
            .uri(RELAY_ENDPOINT)
            .header("content-type", "application/json")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), brevo_credentials());

        let request = Request::builder()
            .method("POST")
            .uri(RELAY_ENDPOINT)
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_success_forwards_credential_and_payload() {
        let sender = FakeSender::new(
            Provider::Brevo,
            Behavior::Reply(201, json!({ "messageId": "<42@brevo>" })),
        );
        let app = app(sender.clone(), brevo_credentials());

        let response = app.oneshot(post_json(&valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], SUCCESS_MESSAGE);
        assert_eq!(body["data"]["messageId"], "<42@brevo>");

        let calls = sender.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "xkeysib-test");
        assert_eq!(calls[0].1.payload.name, "Amel");
        assert_eq!(calls[0].1.payload.html_content, "<p>Bonjour</p>");
    }

    #[tokio::test]
    async fn test_downstream_status_is_propagated() {
        let sender = FakeSender::new(
            Provider::Brevo,
            Behavior::Reply(401, json!({ "code": "unauthorized", "message": "Key not found" })),
        );
        let app = app(sender, brevo_credentials());

        let response = app.oneshot(post_json(&valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
        assert!(body.get("success").is_none());
        assert!(!body.to_string().contains("Key not found"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic_500() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Fail);
        let app = app(sender, brevo_credentials());

        let response = app.oneshot(post_json(&valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error = body_json(response).await["error"].as_str().unwrap().to_string();
        assert!(!error.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_multipart_attachment_reaches_sender() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), brevo_credentials());

        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"name\"\r\n\r\n",
            "Amel\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"email\"\r\n\r\n",
            "amel@example.com\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"subject\"\r\n\r\n",
            "Brief\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"htmlContent\"\r\n\r\n",
            "<p>Ci-joint</p>\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"attachment\"; filename=\"brief.txt\"\r\n",
            "Content-Type: text/plain\r\n\r\n",
            "hello\r\n",
            "--XBOUNDARY--\r\n",
        );
        let request = Request::builder()
            .method("POST")
            .uri(RELAY_ENDPOINT)
            .header("content-type", "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body.get("data").is_none());

        let calls = sender.calls();
        assert_eq!(calls.len(), 1);
        let message = &calls[0].1;
        assert_eq!(message.payload.subject, "Brief");
        assert_eq!(message.attachments.len(), 1);
        assert_eq!(message.attachments[0].filename, "brief.txt");
        assert_eq!(message.attachments[0].content_type, "text/plain");
        assert_eq!(message.attachments[0].data, b"hello");
    }

    #[tokio::test]
    async fn test_log_provider_needs_no_credential() {
        let app = app(Arc::new(LogSender), Arc::new(StaticCredentials::new()));

        let response = app.oneshot(post_json(&valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
    }

    #[tokio::test]
    async fn test_custom_allow_origin() {
        let sender = FakeSender::new(Provider::Log, Behavior::Reply(200, Value::Null));
        let app = relay_router(
            RelayState {
                sender,
                credentials: Arc::new(StaticCredentials::new()),
            },
            HeaderValue::from_static("https://telyaagency.com"),
        );

        let response = app.oneshot(post_json(&valid_body())).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://telyaagency.com"
        );
    }

    #[tokio::test]
    async fn test_form_intake_forwards_portfolio_shaped_body() {
        let sender = FakeSender::form_intake(Behavior::Reply(200, json!({ "ok": true })));
        let credentials = Arc::new(StaticCredentials::new().with("FORMSPARK_FORM_ID", "abc123"));
        let app = app(sender.clone(), credentials);

        let body = json!({
            "name": "Marc",
            "email": "marc@nomades.fr",
            "companyName": "Aventures Nomades",
        });
        let response = app.oneshot(post_json(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let calls = sender.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "abc123");
        let payload = &calls[0].1.payload;
        assert_eq!(payload.email, "marc@nomades.fr");
        assert_eq!(payload.company_name.as_deref(), Some("Aventures Nomades"));
        assert!(payload.subject.is_empty());
    }

    #[tokio::test]
    async fn test_form_intake_still_needs_form_id() {
        let sender = FakeSender::form_intake(Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), Arc::new(StaticCredentials::new()));

        let response = app
            .oneshot(post_json(&json!({ "email": "marc@nomades.fr" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(sender.calls().is_empty());
    }

    #[tokio::test]
    async fn test_log_provider_accepts_questionnaire_fields() {
        let app = app(Arc::new(LogSender), Arc::new(StaticCredentials::new()));

        let body = json!({
            "name": "Leila",
            "email": "leila@oasis.tn",
            "establishmentType": "Hôtel",
            "_subject": "Nouveau questionnaire",
        });
        let response = app.oneshot(post_json(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let sender = FakeSender::new(Provider::Brevo, Behavior::Reply(200, Value::Null));
        let app = app(sender.clone(), brevo_credentials());

        let request = Request::builder()
            .method("POST")
            .uri(RELAY_ENDPOINT)
            .header("content-type", "application/json")
            .body(Body::from(vec![b' '; MAX_BODY_BYTES + 1]))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert!(body_json(response).await["error"].as_str().unwrap().contains("10 Mo"));
        assert!(sender.calls().is_empty());
    }
}
