//! Configuration management for gemreview
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GEMREVIEW_*)
//! 3. Config file (~/.config/gemreview/config.toml)
//! 4. Default values
//!
//! The API key is not part of the configuration, see [`crate::secrets`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::CredentialTable;
use crate::{Error, Result};

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Public Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model identifier sent to the generateContent endpoint
    pub model: String,

    /// Base URL of the Gemini API
    pub base_url: String,

    /// Request timeout; the HTTP client default applies when unset
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Login configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Username to password table
    pub users: BTreeMap<String, String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            users: CredentialTable::builtin().into_entries(),
        }
    }
}

impl AuthConfig {
    /// Build the credential table injected into the session gate
    pub fn credential_table(&self) -> CredentialTable {
        CredentialTable::new(self.users.clone())
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Gemini configuration
    pub gemini: GeminiConfig,

    /// Login configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        if config.auth.users.is_empty() {
            return Err(Error::Config(
                "[auth.users] must list at least one user".to_string(),
            ));
        }

        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/gemreview/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gemreview").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GEMREVIEW_MODEL: Model identifier
    /// - GEMREVIEW_BASE_URL: Gemini API base URL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("GEMREVIEW_MODEL") {
            self.gemini.model = model;
        }

        if let Ok(base_url) = std::env::var("GEMREVIEW_BASE_URL") {
            self.gemini.base_url = base_url;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, model: Option<String>, base_url: Option<String>) -> Self {
        if let Some(m) = model {
            self.gemini.model = m;
        }

        if let Some(url) = base_url {
            self.gemini.base_url = url;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(model: Option<String>, base_url: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(model, base_url))
    }
}
