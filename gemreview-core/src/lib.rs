//! gemreview Core - Core library for the gemreview code reviewer
//!
//! This crate provides the login gate, the review request pipeline and the
//! view state machine that a front-end drives one action at a time. The
//! actual model call is delegated to a [`ReviewBackend`] implementation.

pub mod auth;
pub mod config;
pub mod error;
pub mod review;
pub mod secrets;
pub mod upload;
pub mod workflow;

pub use auth::{
    CredentialTable, LoginOutcome, LogoutOutcome, SessionGate, SessionPhase, SessionState,
};
pub use config::{AuthConfig, Config, GeminiConfig};
pub use error::{Error, Result};
pub use review::{
    GenerationParams, Language, ReviewBackend, ReviewFailure, ReviewRequest, ReviewRequester,
    UnconfiguredBackend,
};
pub use secrets::{GeminiSecrets, Secrets};
pub use upload::UploadedFile;
pub use workflow::{Action, Notice, ReviewApp, Transition, View, Workspace};
