//! AI client configuration parsed from environment variables.

use super::types::LlmError;

pub const API_KEY_VAR: &str = "GOOGLE_GENAI_API_KEY";
pub const DEFAULT_GENAI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GENAI_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_GENAI_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed AI config from environment variables.
    ///
    /// Required:
    /// - `GOOGLE_GENAI_API_KEY`
    ///
    /// Optional:
    /// - `GENAI_MODEL`: default `gemini-1.5-pro`
    /// - `GENAI_BASE_URL`: default Google endpoint, trailing `/` stripped
    /// - `GENAI_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GENAI_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when the key is unset or blank.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| LlmError::MissingApiKey { var: API_KEY_VAR.into() })?;

        let model = std::env::var("GENAI_MODEL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GENAI_MODEL.to_string());
        let base_url = normalize_base_url(
            &std::env::var("GENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_GENAI_BASE_URL.to_string()),
        )?;
        let timeouts = LlmTimeouts {
            request_secs: env_parse_u64("GENAI_REQUEST_TIMEOUT_SECS", DEFAULT_GENAI_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("GENAI_CONNECT_TIMEOUT_SECS", DEFAULT_GENAI_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, LlmError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(LlmError::ConfigParse(format!("GENAI_BASE_URL must be an http(s) URL, got '{raw}'")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
