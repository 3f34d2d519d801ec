//! Check command - validate configuration and deployment readiness

use std::path::Path;

use color_eyre::eyre::{Result, bail};

use crate::{
    config::Config,
    env::{CredentialSource, ProcessEnv},
};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration, the provider credential and the site directory.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");

    let result = validate(config_path, &ProcessEnv);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn validate(config_path: &Path, credentials: &dyn CredentialSource) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    if !config_path.exists() {
        result.add_warning(format!(
            "{} not found, using defaults and TELYA__* variables",
            config_path.display()
        ));
    }

    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };

    println!("\nChecking relay provider ({})...", config.relay.provider);
    check_credential(&config, credentials, &mut result);

    println!("\nChecking site directory...");
    check_site_dir(Path::new(&config.server.site_dir), &mut result);

    if config.server.allow_origin == "*" {
        result.add_warning(
            "server.allow_origin is \"*\"; restrict it to the site domain in production",
        );
    }

    result
}

fn check_credential(
    config: &Config,
    credentials: &dyn CredentialSource,
    result: &mut ValidationResult,
) {
    let provider = config.relay.provider;
    match provider.credential_var() {
        Some(var) if credentials.get(var).is_some() => {
            println!("  ✓ {var} is set");
        }
        Some(var) => {
            result.add_warning(format!(
                "{var} is not set; provider {provider} will answer every submission with 500"
            ));
        }
        None => {
            result.add_warning(format!(
                "provider {provider} only logs submissions; nothing is delivered"
            ));
        }
    }
}

fn check_site_dir(site_dir: &Path, result: &mut ValidationResult) {
    if !site_dir.is_dir() {
        result.add_warning(format!(
            "Site directory {} does not exist",
            site_dir.display()
        ));
        return;
    }

    if site_dir.join("index.html").is_file() {
        println!("  ✓ index.html present");
    } else {
        result.add_warning(format!(
            "{} has no index.html; client routes will 404",
            site_dir.display()
        ));
    }
}
