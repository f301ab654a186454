//! CLI command implementations

pub mod review;
pub mod secrets;
pub mod session;

pub use review::ReviewArgs;
pub use secrets::SecretsArgs;
pub use session::SessionArgs;

use gemreview_core::{
    Config, ReviewApp, ReviewBackend, ReviewRequester, Secrets, SessionGate, UnconfiguredBackend,
};
use gemreview_gemini::GeminiClient;

/// An app ready to serve one session, plus any model configuration problem
pub struct Startup {
    pub app: ReviewApp,
    /// Shown to the user; reviews fail until it is fixed
    pub config_error: Option<String>,
}

/// Wire the login gate and the Gemini backend from configuration
///
/// A missing or unusable API key does not stop the app: reviews then fail
/// with the configuration error instead.
pub fn build_app(config: &Config, secrets: &Secrets) -> Startup {
    let gate = SessionGate::new(config.auth.credential_table());

    let backend = GeminiClient::from_secrets(secrets, &config.gemini).map_err(|e| e.to_string());

    let (backend, config_error) = match backend {
        Ok(client) => (Box::new(client) as Box<dyn ReviewBackend>, None),
        Err(reason) => {
            tracing::warn!(error = %reason, "Gemini backend not configured");
            let fallback = UnconfiguredBackend::new(reason.clone());
            (Box::new(fallback) as Box<dyn ReviewBackend>, Some(reason))
        }
    };

    Startup {
        app: ReviewApp::new(gate, ReviewRequester::new(backend)),
        config_error,
    }
}

/// Load the secrets file, falling back to empty secrets when it is unusable
///
/// The environment variable can still supply the API key in that case.
pub fn load_secrets() -> Secrets {
    match Secrets::load() {
        Ok(secrets) => secrets,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring secrets file");
            eprintln!("[error] {}", e);
            Secrets::default()
        }
    }
}
