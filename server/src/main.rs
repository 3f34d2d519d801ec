//! Telya CLI
//!
//! Serves the Telya Agency site together with its form relay endpoint.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for the Telya server.
#[derive(Parser)]
#[command(
    name = "telya",
    version,
    about = "Telya Agency site host and form relay"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the site and the /api/send-email relay
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Built site directory (overrides server.site_dir)
        #[arg(long)]
        site_dir: Option<std::path::PathBuf>,
    },
    /// Validate configuration and provider credentials
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telya_server::init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve { port, site_dir } => {
            telya_server::cmd::serve::run(&cli.config, port, site_dir.as_deref()).await?;
        }
        Commands::Check { strict } => {
            telya_server::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_serve_defaults() {
        let cli = Cli::parse_from(["telya", "serve"]);

        assert_eq!(cli.config, std::path::PathBuf::from("config.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Serve { port, site_dir } => {
                assert!(port.is_none());
                assert!(site_dir.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_serve_overrides() {
        let args = ["telya", "serve", "--port", "8080", "--site-dir", "dist"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Serve { port, site_dir } => {
                assert_eq!(port, Some(8080));
                assert_eq!(site_dir, Some(std::path::PathBuf::from("dist")));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let cli = Cli::parse_from(["telya", "check", "--strict"]);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_and_config() {
        let cli = Cli::parse_from(["telya", "-vv", "-c", "prod.toml", "check"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, std::path::PathBuf::from("prod.toml"));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["telya"]).is_err());
    }
}
