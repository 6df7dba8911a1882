//! # Configuration
//!
//! Settings for the server and the solver bridge.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config kumihimo.toml`)
//! 3. Environment variables
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [solver]
//! base_url = "http://localhost:5000/api"
//! timeout_secs = 30
//! ```
//!
//! ## Environment Variables
//!
//! - `KUMIHIMO_SOLVER_URL`: Solver base URL
//! - `KUMIHIMO_SOLVER_TIMEOUT`: Solver request timeout in seconds

use kumihimo_core::KumihimoError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default solver base URL.
pub const DEFAULT_SOLVER_URL: &str = "http://localhost:5000/api";

/// Default solver timeout. The solver's search can be slow for long patterns.
pub const DEFAULT_SOLVER_TIMEOUT_SECS: u64 = 30;

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub solver: SolverConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Solver bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOLVER_URL.to_string(),
            timeout_secs: DEFAULT_SOLVER_TIMEOUT_SECS,
        }
    }
}

impl SolverConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, KumihimoError> {
        toml::from_str(text).map_err(|e| KumihimoError::ConfigError(e.to_string()))
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, KumihimoError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            KumihimoError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(KumihimoError::ConfigError(format!(
                "Config file {} exceeds {} bytes",
                path.display(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            KumihimoError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Load defaults, then the optional file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, KumihimoError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("KUMIHIMO_SOLVER_URL").filter(|u| !u.is_empty()) {
            self.solver.base_url = url;
        }
        if let Some(raw) = lookup("KUMIHIMO_SOLVER_TIMEOUT") {
            match raw.parse() {
                Ok(secs) => self.solver.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid KUMIHIMO_SOLVER_TIMEOUT '{}'", raw),
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
