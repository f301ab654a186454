//! gemreview CLI - Command line interface for gemreview
//!
//! Log in with a configured account and get AI code reviews from Gemini.

mod commands;

use clap::{Parser, Subcommand};
use gemreview_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ReviewArgs, SecretsArgs, SessionArgs};

/// gemreview: AI code reviews behind a login
#[derive(Parser, Debug)]
#[command(name = "gemreview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Gemini model to use (overrides config and env)
    #[arg(long, global = true, env = "GEMREVIEW_MODEL")]
    model: Option<String>,

    /// Gemini API base URL (overrides config and env)
    #[arg(long, global = true, env = "GEMREVIEW_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Start an interactive login and review session (default)
    #[command(visible_alias = "s")]
    Session(SessionArgs),

    /// Log in and review a single file
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Manage the secrets file holding the API key
    Secrets(SecretsArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.model.clone(), cli.base_url.clone())?;

    if cli.verbose {
        tracing::info!(
            model = %config.gemini.model,
            base_url = %config.gemini.base_url,
            timeout = ?config.gemini.timeout,
            users = config.auth.users.len(),
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("gemreview {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Session(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        None => {
            SessionArgs::default().execute(cli.verbose, &config).await?;
        }
        Some(Commands::Review(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Secrets(args)) => {
            args.execute()?;
        }
        Some(Commands::Config) => {
            println!("gemreview Configuration");
            println!("=======================");
            println!();
            println!("Gemini Settings:");
            println!("  model: {}", config.gemini.model);
            println!("  base_url: {}", config.gemini.base_url);
            match config.gemini.timeout {
                Some(timeout) => println!("  timeout: {:?}", timeout),
                None => println!("  timeout: (client default)"),
            }
            println!();
            println!("Accounts:");
            for username in config.auth.users.keys() {
                println!("  {}", username);
            }
            println!();
            let api_key = Secrets::load()
                .map(|s| s.api_key().is_some())
                .unwrap_or(false);
            println!(
                "API key: {}",
                if api_key { "configured" } else { "missing" }
            );
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
    }

    Ok(())
}
