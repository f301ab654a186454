//! Credential check and session transitions

use tracing::{info, warn};

use super::credentials::{CredentialCheck, CredentialTable};
use super::session::{SessionPhase, SessionState};

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; carries the logged-in username
    Success(String),
    /// The username is not in the credential table
    InvalidUsername,
    /// The username exists but the password did not match
    WrongPassword,
}

impl LoginOutcome {
    /// Check if the login succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success(_))
    }

    /// Message shown on the login form
    pub fn message(&self) -> &'static str {
        match self {
            LoginOutcome::Success(_) => "Login successful!",
            LoginOutcome::InvalidUsername => "Invalid username.",
            LoginOutcome::WrongPassword => "Incorrect password.",
        }
    }
}

/// Result of a logout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The session was cleared; the front-end is not re-rendered automatically
    RefreshRequired,
}

impl LogoutOutcome {
    /// Message shown after logging out
    pub fn message(&self) -> &'static str {
        match self {
            LogoutOutcome::RefreshRequired => "Logged out. Please refresh to login again.",
        }
    }
}

/// Validates credentials and toggles session state
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    credentials: CredentialTable,
}

impl SessionGate {
    /// Create a gate backed by the given credential table
    pub fn new(credentials: CredentialTable) -> Self {
        Self { credentials }
    }

    /// Check credentials and log the session in on success
    ///
    /// The username is checked first, so an unknown user always yields
    /// [`LoginOutcome::InvalidUsername`] whatever the password. Failed attempts
    /// leave `session` untouched.
    pub fn attempt_login(
        &self,
        session: &mut SessionState,
        username: &str,
        password: &str,
    ) -> LoginOutcome {
        match self.credentials.check(username, password) {
            CredentialCheck::UnknownUser => {
                warn!(username = %username, "Login rejected: unknown username");
                LoginOutcome::InvalidUsername
            }
            CredentialCheck::Mismatch => {
                warn!(username = %username, "Login rejected: incorrect password");
                LoginOutcome::WrongPassword
            }
            CredentialCheck::Match => {
                info!(
                    username = %username,
                    from = ?session.phase(),
                    to = ?SessionPhase::LoggedIn,
                    "Login successful"
                );
                session.sign_in(username);
                LoginOutcome::Success(username.to_string())
            }
        }
    }

    /// Reset the session to its initial logged-out value
    pub fn logout(&self, session: &mut SessionState) -> LogoutOutcome {
        if session.is_authenticated() {
            info!(username = %session.username(), "Logged out");
        }
        session.clear();
        LogoutOutcome::RefreshRequired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SessionGate {
        SessionGate::new(CredentialTable::builtin())
    }

    #[test]
    fn test_admin_login() {
        let mut session = SessionState::new();
        let outcome = gate().attempt_login(&mut session, "admin", "password123");

        assert_eq!(outcome, LoginOutcome::Success("admin".to_string()));
        assert!(session.is_authenticated());
        assert_eq!(session.username(), "admin");
    }

    #[test]
    fn test_user_login() {
        let mut session = SessionState::new();
        let outcome = gate().attempt_login(&mut session, "user", "codeai2024");

        assert_eq!(outcome, LoginOutcome::Success("user".to_string()));
        assert_eq!(session.phase(), SessionPhase::LoggedIn);
    }

    #[test]
    fn test_unknown_usernames_rejected() {
        let gate = gate();
        for name in ["", "root", "Admin", "admin ", "guest"] {
            let mut session = SessionState::new();
            // Even a password that belongs to another account is irrelevant
            let outcome = gate.attempt_login(&mut session, name, "password123");
            assert_eq!(outcome, LoginOutcome::InvalidUsername, "username {name:?}");
            assert_eq!(session, SessionState::default());
        }
    }

    #[test]
    fn test_wrong_passwords_rejected() {
        let gate = gate();
        for (name, password) in [
            ("admin", "codeai2024"),
            ("admin", ""),
            ("user", "password123"),
            ("user", "CODEAI2024"),
        ] {
            let mut session = SessionState::new();
            let outcome = gate.attempt_login(&mut session, name, password);
            assert_eq!(outcome, LoginOutcome::WrongPassword);
            assert_eq!(session.phase(), SessionPhase::LoggedOut);
        }
    }

    #[test]
    fn test_unlimited_retries() {
        let gate = gate();
        let mut session = SessionState::new();
        for _ in 0..10 {
            assert!(!gate.attempt_login(&mut session, "admin", "nope").is_success());
        }
        assert!(gate
            .attempt_login(&mut session, "admin", "password123")
            .is_success());
    }

    #[test]
    fn test_logout_resets_session() {
        let gate = gate();
        let mut session = SessionState::new();
        gate.attempt_login(&mut session, "admin", "password123");

        let outcome = gate.logout(&mut session);
        assert_eq!(outcome, LogoutOutcome::RefreshRequired);
        assert_eq!(session, SessionState::default());
    }

    #[test]
    fn test_logout_when_logged_out() {
        let mut session = SessionState::new();
        gate().logout(&mut session);
        assert_eq!(session, SessionState::default());
    }

    #[test]
    fn test_injected_table() {
        let gate = SessionGate::new(CredentialTable::new([("alice", "wonderland")]));
        let mut session = SessionState::new();

        assert_eq!(
            gate.attempt_login(&mut session, "admin", "password123"),
            LoginOutcome::InvalidUsername
        );
        assert!(gate
            .attempt_login(&mut session, "alice", "wonderland")
            .is_success());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(LoginOutcome::InvalidUsername.message(), "Invalid username.");
        assert_eq!(LoginOutcome::WrongPassword.message(), "Incorrect password.");
        assert!(LogoutOutcome::RefreshRequired.message().contains("refresh"));
    }
}
