//! HTTP application assembly.

use std::{path::Path, sync::Arc, time::Duration};

use axum::{Router, http::HeaderValue};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    api::{RelayState, relay_router},
    config::Config,
    env::CredentialSource,
    error::{ConfigError, Result},
    relay::build_sender,
    site::site_service,
};

/// Relay state built from configuration.
pub fn relay_state(config: &Config, credentials: Arc<dyn CredentialSource>) -> Result<RelayState> {
    let mut builder = reqwest::Client::builder();
    if config.relay.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.relay.timeout_secs));
    }
    let client = builder
        .build()
        .map_err(|e| ConfigError::invalid_with_source("Failed to build HTTP client", e))?;

    Ok(RelayState {
        sender: build_sender(&config.relay, client),
        credentials,
    })
}

/// Create the application router: relay endpoint plus the static site.
pub fn create_router(config: &Config, site_dir: &Path, state: RelayState) -> Result<Router> {
    let allow_origin = HeaderValue::from_str(&config.server.allow_origin).map_err(|e| {
        ConfigError::invalid_with_source(
            format!("Invalid allow_origin: {}", config.server.allow_origin),
            e,
        )
    })?;

    Ok(relay_router(state, allow_origin)
        .fallback_service(site_service(site_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
}
