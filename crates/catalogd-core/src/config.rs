//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries
//! sub-configs for the server, on-disk storage, and CORS. Every section
//! defaults sensibly so a completely empty `{}` file is valid. The allowed
//! CORS origin can additionally be overridden with the `FRONT_URL`
//! environment variable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Environment variable that overrides the allowed CORS origin.
pub const FRONT_URL_ENV: &str = "FRONT_URL";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    ///
    /// This is intentionally string-based so the caller can read the file
    /// however it sees fit.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Apply environment overrides (currently just `FRONT_URL`).
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(FRONT_URL_ENV) {
            if !url.is_empty() {
                self.cors.front_url = url;
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }
        if self.cors.front_url.is_empty() {
            warnings.push("cors.front_url is empty; all cross-origin calls will fail".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 9000,
        }
    }
}

/// On-disk storage locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Directory holding content-addressed image blobs.
    pub image_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("db/catalogd.db"),
            image_dir: PathBuf::from("images"),
        }
    }
}

/// Cross-origin policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// The single front-end origin allowed to call the API.
    pub front_url: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            front_url: "http://localhost:3000".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_valid() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cors.front_url, "http://localhost:3000");
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = Config::from_json(r#"{"server": {"port": 8080}}"#).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.image_dir, PathBuf::from("images"));
    }

    #[test]
    fn invalid_json_is_validation_error() {
        let err = Config::from_json("{not json").unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let config = Config::load_or_default(Some(Path::new("/nonexistent/config.json")));
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn validate_flags_empty_origin() {
        let mut config = Config::default();
        config.cors.front_url.clear();
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("front_url")));
    }
}
