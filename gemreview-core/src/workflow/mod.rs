//! Front-end state machine
//!
//! A front-end feeds user [`Action`]s to [`ReviewApp::handle`] and renders
//! the returned [`Transition`]. Which view is shown depends only on the
//! session, so the reviewer view is unreachable without logging in.

mod app;
mod view;

pub use app::{Action, Notice, ReviewApp, Transition, Workspace};
pub use view::View;
