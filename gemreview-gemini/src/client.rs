//! Gemini API client using reqwest

use async_trait::async_trait;
use gemreview_core::{GeminiConfig, GenerationParams, ReviewBackend, Secrets};
use reqwest::StatusCode;
use tracing::{debug, info};
use url::Url;

use crate::models::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::{Error, Result};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for the configured model
    pub fn new(api_key: impl Into<String>, config: &GeminiConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Auth("API key is empty".to_string()));
        }

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        info!(model = %config.model, base_url = %base_url, "Created Gemini client");

        Ok(Self {
            http,
            base_url,
            model: config.model.clone(),
            api_key,
        })
    }

    /// Create a client with the API key from the environment or secrets file
    pub fn from_secrets(secrets: &Secrets, config: &GeminiConfig) -> Result<Self> {
        let api_key = secrets
            .api_key()
            .ok_or_else(|| Error::MissingApiKey(Secrets::missing_api_key_message()))?;
        Self::new(api_key, config)
    }

    /// Full URL of the generateContent call for the configured model
    pub fn endpoint(&self) -> Result<Url> {
        Ok(self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))?)
    }

    /// Send a prompt and return the generated text
    pub async fn generate_content(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let url = self.endpoint()?;
        let body = GenerateContentRequest::from_prompt(prompt, params);

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(error_for_status(status, &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;

        if let Some(reason) = parsed.block_reason() {
            return Err(Error::Blocked(reason.to_string()));
        }

        let output = parsed.text().ok_or_else(|| {
            Error::EmptyResponse(parsed.finish_reason().unwrap_or("UNKNOWN").to_string())
        })?;

        debug!(
            finish_reason = ?parsed.finish_reason(),
            response_len = output.len(),
            "generateContent succeeded"
        );

        Ok(output)
    }
}

/// Map a non-success response to an error
fn error_for_status(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| {
            if envelope.error.message.is_empty() {
                envelope.error.status.unwrap_or_default()
            } else {
                envelope.error.message
            }
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited(message),
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl ReviewBackend for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> gemreview_core::Result<String> {
        Ok(self.generate_content(prompt, params).await?)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
