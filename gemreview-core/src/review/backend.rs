//! Backend abstraction for text-generation services

use async_trait::async_trait;

use crate::{Error, Result};

use super::GenerationParams;

/// Trait for services that turn a prompt into review text
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &'static str;

    /// Send one prompt and return the generated text
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}

/// Backend used when the model could not be configured
///
/// Every call fails with the configuration problem, so a front-end keeps
/// running and shows the reason on each review attempt.
#[derive(Debug, Clone)]
pub struct UnconfiguredBackend {
    reason: String,
}

impl UnconfiguredBackend {
    /// Create a backend that always fails with `reason`
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ReviewBackend for UnconfiguredBackend {
    fn name(&self) -> &'static str {
        "unconfigured"
    }

    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> Result<String> {
        Err(Error::Config(self.reason.clone()))
    }
}
