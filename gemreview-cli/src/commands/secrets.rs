//! Secrets file commands

use clap::{Args, Subcommand};
use gemreview_core::Secrets;

/// Secrets file commands
#[derive(Args, Debug)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// Create a secrets template with owner-only permissions
    Init,

    /// Print the secrets file location
    Path,
}

impl SecretsArgs {
    /// Execute the secrets command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            SecretsCommand::Init => {
                let path = Secrets::create_template()?;
                println!("Created {}", path.display());
                println!("Add your Gemini API key there, or set GOOGLE_API_KEY.");
            }
            SecretsCommand::Path => match Secrets::default_secrets_path() {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("Could not determine secrets path"),
            },
        }
        Ok(())
    }
}
