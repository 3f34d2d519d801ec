//! Server and relay configuration.
//!
//! Provider credentials are deliberately absent: they are read from the
//! environment on every relay request (see [`crate::env`]).

use std::{net::SocketAddr, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Form relay settings.
    #[serde(default)]
    pub relay: RelayConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built site (index.html, pkg/).
    #[serde(default = "default_site_dir")]
    pub site_dir: String,

    /// Value of `Access-Control-Allow-Origin` on relay responses.
    #[serde(default = "default_allow_origin")]
    pub allow_origin: String,
}

/// Downstream email / form service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Formspark form endpoint.
    #[default]
    Formspark,
    /// Brevo transactional email API.
    Brevo,
    /// Resend email API.
    Resend,
    /// Write submissions to the log only.
    Log,
}

impl Provider {
    /// Environment variable holding the provider credential, if one is needed.
    pub fn credential_var(self) -> Option<&'static str> {
        match self {
            Provider::Formspark => Some("FORMSPARK_FORM_ID"),
            Provider::Brevo => Some("BREVO_API_KEY"),
            Provider::Resend => Some("RESEND_API_KEY"),
            Provider::Log => None,
        }
    }

    /// Whether the provider sends a real email and needs sender/recipient.
    pub fn sends_email(self) -> bool {
        matches!(self, Provider::Brevo | Provider::Resend)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Formspark => "formspark",
            Provider::Brevo => "brevo",
            Provider::Resend => "resend",
            Provider::Log => "log",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Active provider; exactly one per deployment.
    #[serde(default)]
    pub provider: Provider,

    /// Display name of the sending mailbox.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Verified sender address (Brevo / Resend).
    #[serde(default = "default_agency_email")]
    pub sender_email: String,

    /// Mailbox receiving submissions (Brevo / Resend).
    #[serde(default = "default_agency_email")]
    pub recipient_email: String,

    /// Override of the provider base URL (staging or local stubs).
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Downstream request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_site_dir() -> String {
    "target/site".to_string()
}

fn default_allow_origin() -> String {
    "*".to_string()
}

fn default_sender_name() -> String {
    "Telya Agency".to_string()
}

fn default_agency_email() -> String {
    telya_core::form::AGENCY_EMAIL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            site_dir: default_site_dir(),
            allow_origin: default_allow_origin(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            sender_name: default_sender_name(),
            sender_email: default_agency_email(),
            recipient_email: default_agency_email(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::invalid(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            ConfigError::invalid_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load an optional TOML file overlaid with `TELYA__*` environment variables.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("TELYA").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.server.site_dir.is_empty() {
            return Err(ConfigError::invalid("server.site_dir cannot be empty"));
        }

        if self.server.allow_origin.is_empty() {
            return Err(ConfigError::invalid("server.allow_origin cannot be empty"));
        }

        if self.relay.provider.sends_email() {
            if !telya_core::is_valid_email(&self.relay.sender_email) {
                return Err(ConfigError::invalid(format!(
                    "relay.sender_email must be a valid address for provider {}",
                    self.relay.provider
                )));
            }
            if !telya_core::is_valid_email(&self.relay.recipient_email) {
                return Err(ConfigError::invalid(format!(
                    "relay.recipient_email must be a valid address for provider {}",
                    self.relay.provider
                )));
            }
        }

        if self.relay.timeout_secs == 0 {
            tracing::warn!("relay.timeout_secs is 0; downstream requests will not time out");
        }

        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e| {
            ConfigError::invalid_with_source(format!("Invalid bind address {addr}"), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).expect("write");
        (dir, path)
    }

    #[test]
    fn test_load_config() {
        let (_dir, path) = write_config(
            r#"
[server]
host = "0.0.0.0"
port = 8080
site_dir = "dist"
allow_origin = "https://telyaagency.com"

[relay]
provider = "brevo"
sender_name = "Site Telya"
sender_email = "site@telyaagency.com"
recipient_email = "contact@telyaagency.com"
timeout_secs = 5
"#,
        );

        let config = Config::load(&path).expect("load config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.site_dir, "dist");
        assert_eq!(config.server.allow_origin, "https://telyaagency.com");
        assert_eq!(config.relay.provider, Provider::Brevo);
        assert_eq!(config.relay.sender_name, "Site Telya");
        assert_eq!(config.relay.recipient_email, "contact@telyaagency.com");
        assert_eq!(config.relay.timeout_secs, 5);
        assert_eq!(
            config.bind_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_config_defaults() {
        let (_dir, path) = write_config("");
        let config = Config::load(&path).expect("load config");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.site_dir, "target/site");
        assert_eq!(config.server.allow_origin, "*");
        assert_eq!(config.relay.provider, Provider::Formspark);
        assert_eq!(config.relay.recipient_email, "telyaagency@gmail.com");
        assert!(config.relay.endpoint.is_none());
    }

    #[test]
    fn test_config_rejects_bad_sender_for_email_provider() {
        let (_dir, path) = write_config(
            r#"
[relay]
provider = "resend"
sender_email = "not-an-address"
"#,
        );
        let result = Config::load(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("sender_email"));
    }

    #[test]
    fn test_config_unknown_provider() {
        let (_dir, path) = write_config(
            r#"
[relay]
provider = "sendgrid"
"#,
        );
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_with_env_allows_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = Config::load_with_env(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_provider_credentials() {
        assert_eq!(Provider::Formspark.credential_var(), Some("FORMSPARK_FORM_ID"));
        assert_eq!(Provider::Brevo.credential_var(), Some("BREVO_API_KEY"));
        assert_eq!(Provider::Resend.credential_var(), Some("RESEND_API_KEY"));
        assert_eq!(Provider::Log.credential_var(), None);
        assert!(Provider::Brevo.sends_email());
        assert!(!Provider::Formspark.sends_email());
    }
}
