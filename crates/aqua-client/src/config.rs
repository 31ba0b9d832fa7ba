//! API client configuration.
//!
//! Configuration priority: ~/.config/aqua/config.toml > environment
//! variables > built-in defaults.

use std::path::Path;

use aqua_core::error::{AquaError, Result};
use aqua_infrastructure::paths::AquaPaths;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.aqua-app.io/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the backend API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the default locations.
    ///
    /// Priority:
    /// 1. ~/.config/aqua/config.toml
    /// 2. `AQUA_API_BASE_URL` environment variable
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = AquaPaths::config_file() {
            if let Ok(config) = Self::from_file(&path) {
                return config;
            }
        }

        if let Ok(base_url) = std::env::var("AQUA_API_BASE_URL") {
            return Self {
                base_url,
                ..Self::default()
            };
        }

        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AquaError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://localhost:8000/api\"").unwrap();

        let config = ApiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        // Missing fields fall back to defaults.
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_file_rejects_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [not valid").unwrap();

        assert!(ApiConfig::from_file(file.path()).is_err());
    }
}
