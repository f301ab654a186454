//! Review requester: prompt in, review text out

use tracing::{debug, info, warn};

use super::{GenerationParams, Language, ReviewBackend, ReviewRequest};

/// A failed review, already phrased for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFailure {
    /// What went wrong in the backend call
    pub description: String,
}

impl std::fmt::Display for ReviewFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error during code review: {}", self.description)
    }
}

impl std::error::Error for ReviewFailure {}

/// Sends review prompts to a backend
///
/// One backend call per review, no retries and no caching.
pub struct ReviewRequester {
    backend: Box<dyn ReviewBackend>,
    params: GenerationParams,
}

impl ReviewRequester {
    /// Create a requester using the fixed review parameters
    pub fn new(backend: Box<dyn ReviewBackend>) -> Self {
        Self {
            backend,
            params: GenerationParams::REVIEW,
        }
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Review a request
    ///
    /// Returns the model text unmodified, or a [`ReviewFailure`] describing
    /// the backend error.
    pub async fn review(&self, request: &ReviewRequest) -> Result<String, ReviewFailure> {
        let prompt = request.to_prompt();

        info!(
            backend = self.backend.name(),
            language = %request.language,
            code_len = request.code.len(),
            "Requesting code review"
        );
        debug!(prompt_len = prompt.len(), "Review prompt built");

        match self.backend.generate(&prompt, &self.params).await {
            Ok(text) => {
                info!(response_len = text.len(), "Code review received");
                Ok(text)
            }
            Err(e) => {
                warn!(error = %e, "Code review failed");
                Err(ReviewFailure {
                    description: e.to_string(),
                })
            }
        }
    }

    /// Review code and always return displayable text
    pub async fn review_text(&self, code: &str, language: Language) -> String {
        let request = ReviewRequest::new(code, language);
        match self.review(&request).await {
            Ok(text) => text,
            Err(failure) => failure.to_string(),
        }
    }
}

impl std::fmt::Debug for ReviewRequester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewRequester")
            .field("backend", &self.backend.name())
            .field("params", &self.params)
            .finish()
    }
}
