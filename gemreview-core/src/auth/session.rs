//! Per-session authentication state

/// Authentication phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// No user is logged in (initial phase)
    LoggedOut,
    /// A user passed the login gate
    LoggedIn,
}

impl SessionPhase {
    /// Check whether moving to `next` is a legal gate transition
    pub fn can_transition_to(&self, next: SessionPhase) -> bool {
        matches!(
            (self, next),
            (SessionPhase::LoggedOut, SessionPhase::LoggedIn)
                | (SessionPhase::LoggedIn, SessionPhase::LoggedOut)
        )
    }
}

/// Authentication record for one interactive session
///
/// Created logged out. Only [`crate::SessionGate`] changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    authenticated: bool,
    username: String,
}

impl SessionState {
    /// Create a logged-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the session passed the login gate
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Logged-in username, empty when logged out
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Current phase
    pub fn phase(&self) -> SessionPhase {
        if self.authenticated {
            SessionPhase::LoggedIn
        } else {
            SessionPhase::LoggedOut
        }
    }

    pub(crate) fn sign_in(&mut self, username: impl Into<String>) {
        self.authenticated = true;
        self.username = username.into();
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
