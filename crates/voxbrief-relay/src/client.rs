//! HTTP client for the inference service.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, error};
use voxbrief_core::{MediaKind, RelaySummary};

use crate::error::RelayError;
use crate::scratch::ScratchFile;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire shape of a `POST /process` 200 reply. Every field is optional.
#[derive(Debug, Deserialize)]
struct ProcessResponse {
    summary: Option<String>,
    transcribed_text: Option<String>,
    summary_short: Option<String>,
}

/// `GET /health` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub models_loaded: bool,
    #[serde(default)]
    pub whisper_loaded: bool,
    #[serde(default)]
    pub summarizer_loaded: bool,
}

#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    missing_summary: String,
}

impl InferenceClient {
    /// `missing_summary` replaces an absent or blank `summary` field in a 200
    /// reply; Telegram refuses to send an empty message.
    pub fn new(base_url: &str, timeout: Duration, missing_summary: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            missing_summary: missing_summary.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload the scratch file to `{base}/process` and parse the summary.
    ///
    /// Exactly one request is made; no retries.
    pub async fn process(&self, media: &ScratchFile) -> Result<RelaySummary, RelayError> {
        let bytes = tokio::fs::read(media.path()).await?;
        let size = bytes.len();
        self.process_bytes(bytes, &media.upload_name(), media.kind())
            .await
            .inspect(|_| debug!(file_id = media.file_id(), size, "inference call succeeded"))
    }

    pub async fn process_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        kind: MediaKind,
    ) -> Result<RelaySummary, RelayError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .map_err(|e| RelayError::Unexpected(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("media_type", kind.as_str());

        let url = format!("{}/process", self.base_url);
        debug!(url = %url, media_type = kind.as_str(), "sending media to inference");

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            error!(status, body = %body, "inference endpoint returned an error");
            return Err(RelayError::ServerError { status, body });
        }

        let parsed: ProcessResponse = resp.json().await.map_err(|e| self.classify(e))?;
        Ok(RelaySummary {
            summary_text: parsed
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| self.missing_summary.clone()),
            transcribed_text: parsed.transcribed_text,
            summary_short: parsed.summary_short,
        })
    }

    /// Probe `{base}/health`.
    pub async fn health(&self) -> Result<HealthReport, RelayError> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RelayError::ServerError { status, body });
        }
        resp.json().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> RelayError {
        if e.is_timeout() {
            RelayError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            RelayError::Unreachable(e.to_string())
        } else {
            RelayError::Unexpected(e.to_string())
        }
    }
}
