//! Views a front-end can render

use crate::auth::SessionPhase;

/// Screen to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Username/password form
    Login,
    /// Language selector, upload, code editor and review output
    Reviewer,
}

impl View {
    /// View that corresponds to a session phase
    pub fn for_phase(phase: SessionPhase) -> View {
        match phase {
            SessionPhase::LoggedOut => View::Login,
            SessionPhase::LoggedIn => View::Reviewer,
        }
    }

    /// Page title shown by front-ends
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login - Gemini Code Reviewer",
            View::Reviewer => "AI Code Reviewer",
        }
    }

    /// Check if moving from this view to `next` is a gate transition
    ///
    /// Login and Reviewer may switch into each other or stay put.
    pub fn can_transition_to(&self, next: View) -> bool {
        matches!(
            (self, next),
            (View::Login, View::Login)
                | (View::Login, View::Reviewer)
                | (View::Reviewer, View::Reviewer)
                | (View::Reviewer, View::Login)
        )
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
