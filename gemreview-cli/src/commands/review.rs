//! Review command - log in and review one file without the interactive loop

use std::path::PathBuf;

use clap::Args;
use gemreview_core::{Action, Config, Language, Notice, UploadedFile, View};

use super::{build_app, load_secrets};

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Source file to review
    #[arg(required = true)]
    pub file: PathBuf,

    /// Language of the file (detected from the extension if omitted)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Username to log in with
    #[arg(short, long, env = "GEMREVIEW_USER")]
    pub user: String,

    /// Password to log in with
    #[arg(short, long, env = "GEMREVIEW_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let startup = build_app(config, &load_secrets());
        let mut app = startup.app;

        if let Some(error) = &startup.config_error {
            eprintln!("[error] {}", error);
        }

        let transition = app
            .handle(Action::Login {
                username: self.user.clone(),
                password: self.password.clone(),
            })
            .await;
        if transition.view != View::Reviewer {
            anyhow::bail!("Login failed: {}", first_message(&transition.notices));
        }

        let file = UploadedFile::from_path(&self.file)?;
        let language = self
            .language
            .or_else(|| file.language())
            .unwrap_or_default();

        if verbose {
            tracing::info!(
                file = %self.file.display(),
                language = %language,
                "Reviewing file"
            );
        }

        app.handle(Action::SelectLanguage(language)).await;
        let transition = app.handle(Action::Upload(file)).await;
        if let Some(Notice::Error(message)) = transition.notices.first() {
            anyhow::bail!("{}", message);
        }

        let transition = app.handle(Action::Review).await;
        match transition.notices.into_iter().next() {
            Some(Notice::Review(Ok(text))) => {
                println!("{}", text);
                Ok(())
            }
            Some(Notice::Review(Err(failure))) => Err(failure.into()),
            Some(Notice::Warning(message)) => anyhow::bail!("{}", message),
            other => anyhow::bail!("Unexpected review outcome: {:?}", other),
        }
    }
}

fn first_message(notices: &[Notice]) -> String {
    match notices.first() {
        Some(Notice::Error(m) | Notice::Warning(m) | Notice::Info(m) | Notice::Success(m)) => {
            m.clone()
        }
        Some(Notice::Review(_)) | None => "no details".to_string(),
    }
}
