//! Session command - interactive login form and reviewer loop

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use gemreview_core::{Action, Config, Language, Notice, ReviewApp, Transition, UploadedFile, View};
use indicatif::ProgressBar;

use super::{build_app, load_secrets};

/// Arguments for the session command
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Do not show a spinner while waiting for a review
    #[arg(long)]
    pub no_spinner: bool,
}

impl SessionArgs {
    /// Execute the session command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let startup = build_app(config, &load_secrets());
        let mut app = startup.app;

        if verbose {
            tracing::info!(
                backend = app.backend_name(),
                model = %config.gemini.model,
                configured = startup.config_error.is_none(),
                "Starting interactive session"
            );
        }

        let mut terminal = Terminal::new(io::stdin().lock(), io::stdout(), !self.no_spinner);
        if let Some(error) = &startup.config_error {
            terminal.notice(&Notice::Error(error.clone()))?;
        }
        terminal.run(&mut app).await?;

        Ok(())
    }
}

/// A reviewer-view command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Langs,
    Show,
    Lang(Language),
    Upload(PathBuf),
    Code,
    Review,
    Logout,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let no_args = |command: Command| {
        if rest.is_empty() {
            Ok(command)
        } else {
            Err(format!("`{}` takes no arguments", word))
        }
    };

    match word.to_ascii_lowercase().as_str() {
        "help" | "?" => no_args(Command::Help),
        "langs" => no_args(Command::Langs),
        "show" => no_args(Command::Show),
        "code" => no_args(Command::Code),
        "review" => no_args(Command::Review),
        "logout" => no_args(Command::Logout),
        "quit" | "exit" => no_args(Command::Quit),
        "lang" if rest.is_empty() => Err("Usage: lang <name>".to_string()),
        "lang" => rest
            .parse::<Language>()
            .map(Command::Lang)
            .map_err(|e| e.to_string()),
        "upload" if rest.is_empty() => Err("Usage: upload <path>".to_string()),
        "upload" => Ok(Command::Upload(PathBuf::from(rest))),
        _ => Err(format!("Unknown command `{}`. Type `help` for commands.", word)),
    }
}

const HELP: &str = "\
Commands:
  lang <name>     select the language (see `langs`)
  langs           list supported languages
  upload <path>   load a source file into the editor
  code            type code, end with a line containing only `.`
  show            show the selected language and the editor contents
  review          send the code for review
  logout          log out
  quit            leave gemreview";

/// Line-based front-end over any reader and writer
pub struct Terminal<R, W> {
    input: R,
    output: W,
    spinner: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Create a terminal front-end
    pub fn new(input: R, output: W, spinner: bool) -> Self {
        Self {
            input,
            output,
            spinner,
        }
    }

    /// Run until the user quits or input ends
    pub async fn run(&mut self, app: &mut ReviewApp) -> io::Result<()> {
        let mut shown: Option<View> = None;

        loop {
            let view = app.current_view();
            if shown != Some(view) {
                self.header(app)?;
                shown = Some(view);
            }

            let transition = match view {
                View::Login => {
                    let Some(username) = self.read_line("Username: ")? else {
                        break;
                    };
                    let Some(password) = self.read_line("Password: ")? else {
                        break;
                    };
                    app.handle(Action::Login { username, password }).await
                }
                View::Reviewer => {
                    let Some(line) = self.read_line("> ")? else {
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let command = match parse_command(&line) {
                        Ok(command) => command,
                        Err(message) => {
                            self.notice(&Notice::Error(message))?;
                            continue;
                        }
                    };

                    match command {
                        Command::Quit => break,
                        Command::Help => {
                            writeln!(self.output, "{}", HELP)?;
                            continue;
                        }
                        Command::Langs => {
                            for language in Language::ALL {
                                writeln!(
                                    self.output,
                                    "  {:<12} .{}",
                                    language.display_name(),
                                    language.extension()
                                )?;
                            }
                            continue;
                        }
                        Command::Show => {
                            self.show(app)?;
                            continue;
                        }
                        Command::Lang(language) => {
                            let transition = app.handle(Action::SelectLanguage(language)).await;
                            writeln!(self.output, "Language set to {}.", language)?;
                            transition
                        }
                        Command::Upload(path) => match UploadedFile::from_path(&path) {
                            Ok(file) => app.handle(Action::Upload(file)).await,
                            Err(e) => {
                                self.notice(&Notice::Error(e.to_string()))?;
                                continue;
                            }
                        },
                        Command::Code => {
                            let code = self.read_block()?;
                            let lines = code.lines().count();
                            let transition = app.handle(Action::EditCode(code)).await;
                            writeln!(self.output, "Code updated ({} lines).", lines)?;
                            transition
                        }
                        Command::Review => self.review(app).await,
                        Command::Logout => app.handle(Action::Logout).await,
                    }
                }
            };

            self.render(&transition)?;

            if transition.view != view && !transition.rerun {
                // No automatic re-render: wait for the user to refresh
                if self.read_line("Press Enter to refresh...")?.is_none() {
                    break;
                }
            }
        }

        writeln!(self.output, "Bye.")?;
        self.output.flush()
    }

    async fn review(&mut self, app: &mut ReviewApp) -> Transition {
        let spinner = self.spinner.then(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Reviewing...");
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        });

        let transition = app.handle(Action::Review).await;

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        transition
    }

    fn header(&mut self, app: &ReviewApp) -> io::Result<()> {
        let view = app.current_view();
        writeln!(self.output)?;
        writeln!(self.output, "== {} ==", view.title())?;
        match view {
            View::Login => {
                writeln!(self.output, "Login to Gemini Code Reviewer")?;
                writeln!(self.output, "Enter your credentials below:")?;
            }
            View::Reviewer => {
                writeln!(self.output, "Welcome, `{}`", app.session().username())?;
                writeln!(self.output, "Review your code with Gemini AI!")?;
                writeln!(self.output, "Type `help` for commands.")?;
            }
        }
        Ok(())
    }

    fn show(&mut self, app: &ReviewApp) -> io::Result<()> {
        let workspace = app.workspace();
        writeln!(self.output, "Language: {}", workspace.language)?;
        writeln!(
            self.output,
            "Source: {}",
            workspace.source_file.as_deref().unwrap_or("(typed)")
        )?;
        if workspace.code.is_empty() {
            writeln!(self.output, "(editor is empty)")
        } else {
            writeln!(self.output, "{}", workspace.code)
        }
    }

    fn render(&mut self, transition: &Transition) -> io::Result<()> {
        for notice in &transition.notices {
            self.notice(notice)?;
        }
        Ok(())
    }

    /// Print a single notice
    pub fn notice(&mut self, notice: &Notice) -> io::Result<()> {
        match notice {
            Notice::Success(message) => writeln!(self.output, "[ok] {}", message),
            Notice::Info(message) => writeln!(self.output, "[info] {}", message),
            Notice::Warning(message) => writeln!(self.output, "[warn] {}", message),
            Notice::Error(message) => writeln!(self.output, "[error] {}", message),
            Notice::Review(result) => {
                writeln!(self.output)?;
                writeln!(self.output, "Code Review")?;
                writeln!(self.output, "-----------")?;
                match result {
                    Ok(text) => writeln!(self.output, "{}", text),
                    Err(failure) => writeln!(self.output, "{}", failure),
                }
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn read_block(&mut self) -> io::Result<String> {
        writeln!(self.output, "Enter code, finish with a line containing only `.`")?;
        let mut lines = Vec::new();
        while let Some(line) = self.read_line("")? {
            if line == "." {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gemreview_core::{
        CredentialTable, GenerationParams, ReviewBackend, ReviewRequester, SessionGate,
    };
    use std::io::Cursor;

    struct FixedBackend(Result<&'static str, &'static str>);

    #[async_trait]
    impl ReviewBackend for FixedBackend {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
        ) -> gemreview_core::Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|e| gemreview_core::Error::Backend(e.to_string()))
        }
    }

    fn app(reply: Result<&'static str, &'static str>) -> ReviewApp {
        ReviewApp::new(
            SessionGate::new(CredentialTable::builtin()),
            ReviewRequester::new(Box::new(FixedBackend(reply))),
        )
    }

    async fn run_script(app: &mut ReviewApp, script: &str) -> String {
        let mut output = Vec::new();
        let mut terminal = Terminal::new(Cursor::new(script.as_bytes()), &mut output, false);
        terminal.run(app).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("  REVIEW "), Ok(Command::Review));
        assert_eq!(parse_command("lang c++"), Ok(Command::Lang(Language::Cpp)));
        assert_eq!(parse_command("lang   Kotlin"), Ok(Command::Lang(Language::Kotlin)));
        assert_eq!(
            parse_command("upload src/my file.py"),
            Ok(Command::Upload(PathBuf::from("src/my file.py")))
        );
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("lang").is_err());
        assert!(parse_command("upload").is_err());
        assert!(parse_command("review now").is_err());
        assert_eq!(
            parse_command("lang cobol"),
            Err("Unsupported language: cobol".to_string())
        );
        assert!(parse_command("dance").unwrap_err().contains("Unknown command"));
    }

    #[tokio::test]
    async fn test_login_then_review_typed_code() {
        let mut app = app(Ok("Looks good"));
        let output = run_script(
            &mut app,
            "admin\nwrong\nadmin\npassword123\nlang go\ncode\nfmt.Println(1)\n.\nreview\nquit\n",
        )
        .await;

        assert!(output.contains("[error] Incorrect password."));
        assert!(output.contains("[ok] Login successful!"));
        assert!(output.contains("Welcome, `admin`"));
        assert!(output.contains("Language set to Go."));
        assert!(output.contains("Code updated (1 lines)."));
        assert!(output.contains("Code Review\n-----------\nLooks good\n"));
        assert!(output.ends_with("Bye.\n"));
    }

    #[tokio::test]
    async fn test_upload_prefills_editor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.py");
        std::fs::write(&path, "print(1)").unwrap();

        let mut app = app(Ok("ok"));
        let script = format!("user\ncodeai2024\nupload {}\nshow\nquit\n", path.display());
        let output = run_script(&mut app, &script).await;

        assert!(output.contains("[ok] Loaded sample.py"));
        assert!(output.contains("Source: sample.py\nprint(1)\n"));
        assert_eq!(app.workspace().code, "print(1)");
    }

    #[tokio::test]
    async fn test_blank_review_warns() {
        let mut app = app(Ok("unused"));
        let output = run_script(&mut app, "admin\npassword123\nreview\nquit\n").await;

        assert!(output.contains("[warn] Please enter some code."));
        assert!(!output.contains("Code Review"));
    }

    #[tokio::test]
    async fn test_review_failure_is_shown_as_review() {
        let mut app = app(Err("rate limit"));
        let output = run_script(
            &mut app,
            "admin\npassword123\ncode\nx = 1\n.\nreview\nquit\n",
        )
        .await;

        assert!(output.contains("Code Review\n-----------\nError during code review: rate limit\n"));
    }

    #[tokio::test]
    async fn test_logout_waits_for_refresh() {
        let mut app = app(Ok("ok"));
        let output = run_script(&mut app, "admin\npassword123\nlogout\n\nuser\ncodeai2024\nquit\n").await;

        assert!(output.contains("[ok] Logged out. Please refresh to login again."));
        assert!(output.contains("Press Enter to refresh..."));
        assert!(output.contains("Welcome, `user`"));
        assert_eq!(app.session().username(), "user");
    }

    #[tokio::test]
    async fn test_eof_on_login_ends_session() {
        let mut app = app(Ok("ok"));
        let output = run_script(&mut app, "admin\n").await;

        assert!(output.contains("Enter your credentials below:"));
        assert!(output.ends_with("Bye.\n"));
        assert!(!app.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_unknown_command_keeps_running() {
        let mut app = app(Ok("ok"));
        let output = run_script(&mut app, "admin\npassword123\nfly\nlangs\nquit\n").await;

        assert!(output.contains("[error] Unknown command `fly`"));
        assert!(output.contains("C++"));
        assert!(output.contains(".kt"));
    }
}
