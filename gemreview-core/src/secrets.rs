//! Secrets management for gemreview
//!
//! The Gemini API key is kept apart from the configuration so the config file
//! can be shared safely. The secrets file lives at
//! `~/.config/gemreview/secrets.toml` and must have restrictive permissions
//! (0600 on Unix).
//!
//! Loading priority:
//! 1. Environment variable (GOOGLE_API_KEY)
//! 2. Secrets file (~/.config/gemreview/secrets.toml)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Secrets structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    /// Gemini configuration
    pub gemini: GeminiSecrets,
}

/// Gemini-related secrets
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiSecrets {
    /// Google AI Studio API key
    pub api_key: Option<String>,
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        let secrets_path = Self::default_secrets_path();

        if let Some(path) = secrets_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        // Check file permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }

            debug!(path = %path.display(), mode = format!("{:o}", mode & 0o777), "Secrets file permissions OK");
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        // Trim whitespace from key
        if let Some(ref mut key) = secrets.gemini.api_key {
            *key = key.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/gemreview/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gemreview").join("secrets.toml"))
    }

    /// Get the Gemini API key with environment variable override
    ///
    /// Priority: GOOGLE_API_KEY env var > secrets file
    pub fn api_key(&self) -> Option<String> {
        Self::pick_api_key(std::env::var(API_KEY_ENV).ok(), self.gemini.api_key.as_deref())
    }

    /// Message shown when no API key is available
    pub fn missing_api_key_message() -> String {
        format!(
            "{} not found. Set the environment variable or add api_key to {}",
            API_KEY_ENV,
            Self::default_secrets_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "secrets.toml".to_string())
        )
    }

    fn pick_api_key(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
        // Check environment variable first
        if let Some(key) = from_env {
            let key = key.trim().to_string();
            if !key.is_empty() {
                debug!("Using Gemini API key from {} environment variable", API_KEY_ENV);
                return Some(key);
            }
        }

        // Fall back to secrets file
        if let Some(key) = from_file {
            if !key.is_empty() {
                debug!("Using Gemini API key from secrets file");
                return Some(key.to_string());
            }
        }

        None
    }

    /// Create a template secrets file at the default location
    ///
    /// Creates parent directories if needed and sets secure permissions
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;
        Self::create_template_at(&path)?;
        Ok(path)
    }

    /// Create a template secrets file at `path`, refusing to overwrite
    pub fn create_template_at(path: &PathBuf) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        // Don't overwrite existing file
        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }

        let template = r#"# gemreview secrets
# This file contains sensitive credentials - do not share or commit to version control
#
# IMPORTANT: This file must have restrictive permissions (chmod 600)

[gemini]
# Gemini API key
# Create at: https://aistudio.google.com/app/apikey
api_key = ""
"#;

        std::fs::write(path, template).map_err(Error::Io)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(path, perms).map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets template - please edit and add your API key");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_secrets() {
        let secrets = Secrets::default();
        assert!(secrets.gemini.api_key.is_none());
    }

    #[test]
    fn test_parse_secrets() {
        let toml = r#"
[gemini]
api_key = "AIzaSyExample"
"#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.gemini.api_key, Some("AIzaSyExample".to_string()));
    }

    #[test]
    fn test_env_key_wins_over_file() {
        let key = Secrets::pick_api_key(Some(" from_env ".to_string()), Some("from_file"));
        assert_eq!(key, Some("from_env".to_string()));
    }

    #[test]
    fn test_blank_env_key_falls_back_to_file() {
        let key = Secrets::pick_api_key(Some("   ".to_string()), Some("from_file"));
        assert_eq!(key, Some("from_file".to_string()));
    }

    #[test]
    fn test_missing_api_key_message() {
        let message = Secrets::missing_api_key_message();
        assert!(message.starts_with("GOOGLE_API_KEY not found."));
        assert!(message.contains("secrets.toml"));
    }

    #[test]
    fn test_no_key_anywhere() {
        assert_eq!(Secrets::pick_api_key(None, Some("")), None);
        assert_eq!(Secrets::pick_api_key(None, None), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_insecure_permissions_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gemini]\napi_key = \"test\"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o644);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let result = Secrets::load_from_file(&file.path().to_path_buf());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("insecure permissions"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secure_permissions_accepted_and_trimmed() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[gemini]\napi_key = \"  AIza_test  \"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let secrets = Secrets::load_from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(secrets.gemini.api_key, Some("AIza_test".to_string()));
    }

    #[test]
    fn test_create_template_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("secrets.toml");

        Secrets::create_template_at(&path).unwrap();
        assert!(path.exists());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[gemini]"));

        let again = Secrets::create_template_at(&path);
        assert!(again.unwrap_err().to_string().contains("already exists"));
    }

    #[cfg(unix)]
    #[test]
    fn test_template_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        Secrets::create_template_at(&path).unwrap();

        let secrets = Secrets::load_from_file(&path).unwrap();
        assert_eq!(secrets.gemini.api_key, Some(String::new()));
        assert_eq!(Secrets::pick_api_key(None, secrets.gemini.api_key.as_deref()), None);
    }
}
