//! Application controller driven by front-end actions

use tracing::{debug, error, info};

use crate::auth::{LoginOutcome, SessionGate, SessionPhase, SessionState};
use crate::review::{Language, ReviewFailure, ReviewRequest, ReviewRequester};
use crate::upload::UploadedFile;

use super::View;

/// Message shown when reviewer actions arrive without a login
const LOGIN_REQUIRED: &str = "Please log in first.";

/// Warning shown when the review action is used on blank code
const BLANK_CODE: &str = "Please enter some code.";

/// A user action coming from the front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the login form
    Login { username: String, password: String },
    /// Pick the language of the code
    SelectLanguage(Language),
    /// Load a file into the code editor
    Upload(UploadedFile),
    /// Replace the editor contents
    EditCode(String),
    /// Send the editor contents for review
    Review,
    /// Log out and clear the workspace
    Logout,
}

impl Action {
    /// Check whether the action belongs to the reviewer view
    pub fn requires_login(&self) -> bool {
        !matches!(self, Action::Login { .. })
    }

    fn kind(&self) -> &'static str {
        match self {
            Action::Login { .. } => "login",
            Action::SelectLanguage(_) => "select_language",
            Action::Upload(_) => "upload",
            Action::EditCode(_) => "edit_code",
            Action::Review => "review",
            Action::Logout => "logout",
        }
    }
}

/// Something for the front-end to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
    /// Outcome of a review call
    Review(Result<String, ReviewFailure>),
}

/// What a front-end should do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// View to render next
    pub view: View,
    /// Re-render right away; when false the user refreshes manually
    pub rerun: bool,
    /// Messages to display, in order
    pub notices: Vec<Notice>,
}

impl Transition {
    fn stay(view: View, notice: Notice) -> Self {
        Self {
            view,
            rerun: false,
            notices: vec![notice],
        }
    }
}

/// Editor state of the reviewer view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    /// Selected language
    pub language: Language,
    /// Code editor contents
    pub code: String,
    /// Name of the last uploaded file, if the editor was filled from one
    pub source_file: Option<String>,
}

/// Owns one session and routes actions through the gate and the requester
#[derive(Debug)]
pub struct ReviewApp {
    gate: SessionGate,
    requester: ReviewRequester,
    session: SessionState,
    workspace: Workspace,
}

impl ReviewApp {
    /// Create an app with a fresh, logged-out session
    pub fn new(gate: SessionGate, requester: ReviewRequester) -> Self {
        Self {
            gate,
            requester,
            session: SessionState::new(),
            workspace: Workspace::default(),
        }
    }

    /// Current session
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Current editor state
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Name of the review backend in use
    pub fn backend_name(&self) -> &'static str {
        self.requester.backend_name()
    }

    /// View to render for the current session
    pub fn current_view(&self) -> View {
        View::for_phase(self.session.phase())
    }

    /// Apply one action and report what to render next
    pub async fn handle(&mut self, action: Action) -> Transition {
        let from = self.current_view();
        debug!(action = action.kind(), view = ?from, "Handling action");

        if action.requires_login() && !self.session.is_authenticated() {
            let transition =
                Transition::stay(View::Login, Notice::Error(LOGIN_REQUIRED.to_string()));
            return self.checked(from, transition);
        }

        let transition = match action {
            Action::Login { username, password } => self.login(&username, &password),
            Action::SelectLanguage(language) => {
                self.workspace.language = language;
                Transition {
                    view: View::Reviewer,
                    rerun: false,
                    notices: Vec::new(),
                }
            }
            Action::Upload(file) => self.upload(file),
            Action::EditCode(code) => {
                self.workspace.code = code;
                self.workspace.source_file = None;
                Transition {
                    view: View::Reviewer,
                    rerun: false,
                    notices: Vec::new(),
                }
            }
            Action::Review => self.review().await,
            Action::Logout => self.logout(),
        };

        self.checked(from, transition)
    }

    /// Keep the returned view in line with the gate and the session
    ///
    /// The reviewer view is only ever handed out to a logged-in session.
    fn checked(&self, from: View, mut transition: Transition) -> Transition {
        let expected = self.current_view();

        if !from.can_transition_to(transition.view) || transition.view != expected {
            error!(
                from = ?from,
                to = ?transition.view,
                expected = ?expected,
                "Rejected view transition"
            );
            transition.view = expected;
        } else if from != transition.view {
            info!(from = ?from, to = ?transition.view, "View transition");
        }

        transition
    }

    fn login(&mut self, username: &str, password: &str) -> Transition {
        if !self
            .session
            .phase()
            .can_transition_to(SessionPhase::LoggedIn)
        {
            return Transition::stay(
                View::Reviewer,
                Notice::Info(format!("Already logged in as {}.", self.session.username())),
            );
        }

        let outcome = self
            .gate
            .attempt_login(&mut self.session, username, password);

        match outcome {
            LoginOutcome::Success(_) => Transition {
                view: View::Reviewer,
                rerun: true,
                notices: vec![Notice::Success(outcome.message().to_string())],
            },
            LoginOutcome::InvalidUsername | LoginOutcome::WrongPassword => {
                Transition::stay(View::Login, Notice::Error(outcome.message().to_string()))
            }
        }
    }

    fn upload(&mut self, file: UploadedFile) -> Transition {
        let text = match file.decode() {
            Ok(text) => text,
            Err(e) => return Transition::stay(View::Reviewer, Notice::Error(e.to_string())),
        };

        info!(file = %file.name, "Loaded uploaded file into editor");

        let mut notices = vec![Notice::Success(format!("Loaded {}", file.name))];
        if let Some(detected) = file.language() {
            if detected != self.workspace.language {
                notices.push(Notice::Info(format!(
                    "{} looks like {}; selected language is {}.",
                    file.name, detected, self.workspace.language
                )));
            }
        }

        self.workspace.code = text;
        self.workspace.source_file = Some(file.name);

        Transition {
            view: View::Reviewer,
            rerun: false,
            notices,
        }
    }

    async fn review(&mut self) -> Transition {
        let request = ReviewRequest::new(self.workspace.code.clone(), self.workspace.language);
        if request.is_blank() {
            return Transition::stay(View::Reviewer, Notice::Warning(BLANK_CODE.to_string()));
        }

        let result = self.requester.review(&request).await;
        Transition::stay(View::Reviewer, Notice::Review(result))
    }

    fn logout(&mut self) -> Transition {
        let outcome = self.gate.logout(&mut self.session);
        self.workspace = Workspace::default();

        Transition::stay(View::Login, Notice::Success(outcome.message().to_string()))
    }
}
