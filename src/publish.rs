//! Upload of the finished video to a remote media store.
//!
//! The store takes a multipart POST with `file` and `upload_preset` parts and answers with a JSON
//! object carrying the public URL. Any failure is [`ReelError::External`].

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::multipart::Form;

use crate::foundation::error::{ReelError, ReelResult};

/// Where and how to upload.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Upload endpoint URL.
    pub endpoint: String,
    /// Value of the `upload_preset` form part.
    pub upload_preset: String,
    /// Whole-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Response field holding the public URL.
    #[serde(default = "default_url_field")]
    pub url_field: String,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_url_field() -> String {
    "secure_url".to_owned()
}

impl UploadConfig {
    /// Config with default timeout and URL field.
    pub fn new(endpoint: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            upload_preset: upload_preset.into(),
            timeout_secs: default_timeout_secs(),
            url_field: default_url_field(),
        }
    }
}

/// Upload `path` and return the public URL the store reports.
#[tracing::instrument(skip(path, cfg), fields(file = %path.display(), endpoint = %cfg.endpoint))]
pub fn upload(path: &Path, cfg: &UploadConfig) -> ReelResult<String> {
    let form = Form::new()
        .text("upload_preset", cfg.upload_preset.clone())
        .file("file", path)
        .map_err(|e| ReelError::external(format!("upload: read '{}': {e}", path.display())))?;

    let client = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()
        .map_err(|e| ReelError::external(format!("upload: http client: {e}")))?;

    let resp = client
        .post(&cfg.endpoint)
        .multipart(form)
        .send()
        .map_err(|e| ReelError::external(format!("upload: POST {}: {e}", cfg.endpoint)))?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(ReelError::external(format!(
            "upload: POST {}: status {status}: {}",
            cfg.endpoint,
            body.trim()
        )));
    }
    let body: serde_json::Value = resp
        .json()
        .map_err(|e| ReelError::external(format!("upload: response is not JSON: {e}")))?;
    let url = extract_url(&body, &cfg.url_field)?;
    tracing::info!(url = %url, "video uploaded");
    Ok(url)
}

fn extract_url(body: &serde_json::Value, field: &str) -> ReelResult<String> {
    body.get(field)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ReelError::external(format!("upload: response has no '{field}' string")))
}
