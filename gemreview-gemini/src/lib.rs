//! gemreview Gemini - Gemini API integration for gemreview
//!
//! This crate provides a small client for the `generateContent` endpoint and
//! plugs it into the core review pipeline as a [`gemreview_core::ReviewBackend`].

mod client;
mod error;
mod models;

pub use client::GeminiClient;
pub use error::{Error, Result};
pub use models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    PromptFeedback,
};
