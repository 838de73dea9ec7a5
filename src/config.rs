//! Relay server configuration parsed from environment variables.
//!
//! AI provider settings live in [`crate::llm::config`]; this covers the HTTP
//! side: listen port, upload directory, catalog source, and run mode.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Largest accepted image, in bytes (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),
    #[error("invalid RELAY_ENV '{0}' (expected 'development' or 'production')")]
    InvalidEnvironment(String),
}

/// Run mode. Production hides raw error text from API responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
    pub upload_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub mode: RunMode,
    pub max_image_bytes: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            catalog_path: None,
            mode: RunMode::Development,
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }
}

impl RelayConfig {
    /// Build relay config from environment variables.
    ///
    /// - `PORT`: default 3000
    /// - `UPLOAD_DIR`: default `uploads`
    /// - `BUG_CATALOG_PATH`: unset means the built-in catalog
    /// - `RELAY_ENV`: `development` (default) or `production`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparseable port or unknown run mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match non_empty_env("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let upload_dir = non_empty_env("UPLOAD_DIR").map_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR), PathBuf::from);
        let catalog_path = non_empty_env("BUG_CATALOG_PATH").map(PathBuf::from);
        let mode = parse_mode(non_empty_env("RELAY_ENV").as_deref())?;

        Ok(Self { port, upload_dir, catalog_path, mode, max_image_bytes: MAX_IMAGE_BYTES })
    }

    /// Whether raw error text may be sent to clients.
    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        self.mode != RunMode::Production
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_mode(raw: Option<&str>) -> Result<RunMode, ConfigError> {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("development" | "dev") => Ok(RunMode::Development),
        Some("production" | "prod") => Ok(RunMode::Production),
        Some(_) => Err(ConfigError::InvalidEnvironment(raw.unwrap_or_default().to_string())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
