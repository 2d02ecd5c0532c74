//! # Configuration
//!
//! TOML configuration for the Alke binary.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. The TOML file given with `--config`, or `alke.toml` in the working
//!    directory if it exists
//! 3. Environment: `ALKE_API_KEY`, `ALKE_RATE_LIMIT`
//! 4. Command-line flags (applied by the CLI)
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! cors_origins = ["http://localhost:3000"]
//! rate_limit = 100
//!
//! [lot]
//! capacity = 20
//! ```

use alke_core::{ParkingError, primitives::DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "alke.toml";

/// Maximum configuration file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub lot: LotConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty means localhost only; `["*"]` allows all.
    pub cors_origins: Vec<String>,
    /// Requests per second across all clients. 0 disables rate limiting.
    pub rate_limit: u32,
    /// Bearer token required on every endpoint except `/health`.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            rate_limit: 100,
            api_key: None,
        }
    }
}

/// Lot settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LotConfig {
    pub capacity: usize,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ParkingError> {
        toml::from_str(text).map_err(|e| ParkingError::ConfigError(e.to_string()))
    }

    /// Load configuration from `path`, or from `alke.toml` if present, or
    /// fall back to defaults. Environment overrides are applied and the
    /// result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ParkingError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ParkingError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ParkingError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ParkingError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            ParkingError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Apply environment-style overrides through `lookup`.
    ///
    /// `ALKE_API_KEY` (non-empty) replaces the API key; `ALKE_RATE_LIMIT`
    /// replaces the rate limit when it parses as a number.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("ALKE_API_KEY").filter(|k| !k.is_empty()) {
            self.server.api_key = Some(key);
        }
        if let Some(raw) = lookup("ALKE_RATE_LIMIT") {
            match raw.parse() {
                Ok(rps) => self.server.rate_limit = rps,
                Err(_) => tracing::warn!("Ignoring invalid ALKE_RATE_LIMIT '{}'", raw),
            }
        }
    }

    /// Reject settings the lot cannot run with.
    pub fn validate(&self) -> Result<(), ParkingError> {
        if self.lot.capacity == 0 {
            return Err(ParkingError::ConfigError(
                "lot.capacity must be at least 1".to_string(),
            ));
        }
        if self.server.api_key.as_deref() == Some("") {
            return Err(ParkingError::ConfigError(
                "server.api_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_tariff_lot() {
        let config = AppConfig::default();
        assert_eq!(config.lot.capacity, 20);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.rate_limit, 100);
        assert!(config.server.api_key.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str("[lot]\ncapacity = 5\n").expect("parse");
        assert_eq!(config.lot.capacity, 5);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = AppConfig::from_toml_str("[lot]\nspaces = 5\n");
        assert!(matches!(result, Err(ParkingError::ConfigError(_))));
    }

    #[test]
    fn zero_capacity_invalid() {
        let config = AppConfig::from_toml_str("[lot]\ncapacity = 0\n").expect("parse");
        assert!(matches!(
            config.validate(),
            Err(ParkingError::ConfigError(_))
        ));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config =
            AppConfig::from_toml_str("[server]\nrate_limit = 5\napi_key = \"file\"\n")
                .expect("parse");

        config.apply_overrides(|key| match key {
            "ALKE_API_KEY" => Some("env-key".to_string()),
            "ALKE_RATE_LIMIT" => Some("0".to_string()),
            _ => None,
        });

        assert_eq!(config.server.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.server.rate_limit, 0);
    }

    #[test]
    fn invalid_rate_limit_override_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "ALKE_RATE_LIMIT").then(|| "fast".to_string()));
        assert_eq!(config.server.rate_limit, 100);
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9090\n\n[lot]\ncapacity = 12"
        )
        .expect("write");

        let config = AppConfig::from_file(file.path()).expect("load");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.lot.capacity, 12);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = AppConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ParkingError::IoError(_))));
    }
}
