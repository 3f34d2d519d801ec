//! Telya Server Library
//!
//! Hosts the built Telya Agency site and the `/api/send-email` relay that
//! forwards lead forms to a single configured email or form provider.
//!
//! # Modules
//!
//! - [`api`] - The relay endpoint (CORS, body decoding, validation)
//! - [`relay`] - Downstream providers (Formspark, Brevo, Resend, log)
//! - [`site`] - Static hosting with `index.html` fallback
//! - [`server`] - Router assembly
//! - [`cmd`] - Command implementations (serve, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # async fn run() -> color_eyre::eyre::Result<()> {
//! telya_server::cmd::serve::run(Path::new("config.toml"), Some(8080), None).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cmd;
pub mod config;
pub mod env;
pub mod error;
pub mod relay;
pub mod server;
pub mod site;

pub use config::{Config, Provider};
pub use error::ConfigError;
pub use relay::{RelayError, RelaySender};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
