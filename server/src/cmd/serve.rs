//! Serve command - run the site and the relay endpoint

use std::{path::Path, sync::Arc};

use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;

use crate::{
    config::Config,
    env::{CredentialSource, ProcessEnv},
    server::{create_router, relay_state},
};

/// Run the serve command.
///
/// `port` and `site_dir` override the configured values when given.
pub async fn run(config_path: &Path, port: Option<u16>, site_dir: Option<&Path>) -> Result<()> {
    tracing::info!(?config_path, ?port, ?site_dir, "Starting server");

    let mut config =
        Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(dir) = site_dir {
        config.server.site_dir = dir.display().to_string();
    }

    let site_dir = Path::new(&config.server.site_dir);
    if !site_dir.join("index.html").exists() {
        tracing::warn!(
            site_dir = %site_dir.display(),
            "index.html not found; run `cargo leptos build` first"
        );
    }

    let provider = config.relay.provider;
    if let Some(var) = provider.credential_var() {
        if ProcessEnv.get(var).is_none() {
            tracing::warn!(%provider, var, "provider credential is not set; submissions will fail");
        }
    }

    let state = relay_state(&config, Arc::new(ProcessEnv))?;
    let app = create_router(&config, site_dir, state)?;
    let addr = config.bind_addr()?;

    let listener = TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Telya running at http://{addr}");
    println!("  Relay provider: {provider}");
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
