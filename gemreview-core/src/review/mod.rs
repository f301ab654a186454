//! Review module for AI code reviews
//!
//! This module builds the review prompt for a piece of source code and hands
//! it to a [`ReviewBackend`]. Backend failures never escape as errors: the
//! [`ReviewRequester`] turns them into a displayable [`ReviewFailure`].

pub mod backend;
pub mod language;
pub mod request;
pub mod requester;

pub use backend::{ReviewBackend, UnconfiguredBackend};
pub use language::Language;
pub use request::{GenerationParams, ReviewRequest};
pub use requester::{ReviewFailure, ReviewRequester};
