//! Gemini API client.
//!
//! Thin HTTP wrapper over two endpoints: the resumable file upload
//! (`upload/v1beta/files`) and `models/{model}:generateContent`. Pure parsing
//! lives in `parse_*` functions for testability.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::config::LlmConfig;
use super::types::{GenAi, GenerateResponse, LlmError, Part, RemoteFile};

const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, model: config.model, base_url: config.base_url })
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(LlmConfig::from_env()?)
    }

    /// Return the configured model name (e.g. `"gemini-1.5-pro"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn upload_start_url(&self) -> String {
        format!("{}/upload/v1beta/files", self.base_url)
    }

    fn generate_url(&self) -> String {
        let trimmed = self.model.trim();
        if trimmed.starts_with("models/") {
            format!("{}/v1beta/{trimmed}:generateContent", self.base_url)
        } else {
            format!("{}/v1beta/models/{trimmed}:generateContent", self.base_url)
        }
    }

    async fn start_upload(&self, len: usize, mime_type: &str, display_name: &str) -> Result<String, LlmError> {
        let response = self
            .http
            .post(self.upload_start_url())
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", len.to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&json!({ "file": { "display_name": display_name } }))
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiResponse { status, body });
        }

        response
            .headers()
            .get(UPLOAD_URL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| LlmError::ApiParse(format!("upload start response missing {UPLOAD_URL_HEADER}")))
    }
}

#[async_trait::async_trait]
impl GenAi for GeminiClient {
    async fn upload_file(&self, path: &Path, mime_type: &str, display_name: &str) -> Result<RemoteFile, LlmError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| LlmError::FileRead(format!("{}: {e}", path.display())))?;

        let session_url = self
            .start_upload(bytes.len(), mime_type, display_name)
            .await?;

        let response = self
            .http
            .post(&session_url)
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(bytes)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_upload_response(&text, mime_type)
    }

    async fn generate(&self, parts: &[Part]) -> Result<GenerateResponse, LlmError> {
        let body = ApiRequest { contents: vec![ApiContent { role: "user", parts: parts.iter().map(ApiPart::from).collect() }] };

        let response = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_generate_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    role: &'static str,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ApiPart<'a> {
    File {
        #[serde(rename = "fileData")]
        file_data: ApiFileData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiFileData<'a> {
    mime_type: &'a str,
    file_uri: &'a str,
}

impl<'a> From<&'a Part> for ApiPart<'a> {
    fn from(part: &'a Part) -> Self {
        match part {
            Part::File(file) => Self::File { file_data: ApiFileData { mime_type: &file.mime_type, file_uri: &file.uri } },
            Part::Text(text) => Self::Text { text },
        }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    file: UploadedFileInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFileInfo {
    uri: String,
    #[serde(default)]
    mime_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse the finalize response of a resumable upload. Falls back to the
/// declared MIME type when the provider omits it.
fn parse_upload_response(json: &str, declared_mime: &str) -> Result<RemoteFile, LlmError> {
    let api: UploadResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;
    if api.file.uri.trim().is_empty() {
        return Err(LlmError::ApiParse("uploaded file has empty uri".into()));
    }
    Ok(RemoteFile {
        uri: api.file.uri,
        mime_type: api
            .file
            .mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| declared_mime.to_string()),
    })
}

/// Parse a `generateContent` response, joining the text parts of the first
/// candidate. A response without any text is an error.
fn parse_generate_response(json: &str) -> Result<GenerateResponse, LlmError> {
    let api: GenerateApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let Some(candidate) = api.candidates.into_iter().next() else {
        return Err(LlmError::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }

    let (prompt_tokens, output_tokens) = api
        .usage_metadata
        .map_or((0, 0), |u| (u.prompt_token_count, u.candidates_token_count));

    Ok(GenerateResponse { text, finish_reason: candidate.finish_reason, prompt_tokens, output_tokens })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
