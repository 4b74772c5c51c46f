//! OpenAI-compatible model backends.
//!
//! Any server exposing `/v1/audio/transcriptions` (Whisper) and
//! `/v1/chat/completions` works: OpenAI itself, a local whisper.cpp /
//! faster-whisper server, Ollama, vLLM.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};
use voxbrief_core::config::BackendConfig;

use crate::backend::{BackendError, Summarizer, Transcriber};

const DEFAULT_WHISPER_MODEL: &str = "whisper-1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

pub struct WhisperApiTranscriber {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl WhisperApiTranscriber {
    pub fn new(base_url: &str, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_WHISPER_MODEL.to_string()),
        }
    }

    /// `None` when the backend has no `base_url`.
    pub fn from_config(config: &BackendConfig) -> Option<Self> {
        config
            .base_url()
            .map(|url| Self::new(url, config.api_key.clone(), config.model.clone()))
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl Transcriber for WhisperApiTranscriber {
    fn name(&self) -> &str {
        "whisper-api"
    }

    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, BackendError> {
        let part = Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "json");

        let url = format!("{}/v1/audio/transcriptions", self.base_url);
        debug!(model = %self.model, "sending transcription request");

        let mut req = self.client.post(&url).multipart(form);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            warn!(status, body = %message, "transcription API error");
            return Err(BackendError::Api { status, message });
        }

        let parsed: TranscriptionResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        Ok(parsed.text)
    }
}

pub struct ChatSummarizer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatSummarizer {
    pub fn new(base_url: &str, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        }
    }

    /// `None` when the backend has no `base_url`.
    pub fn from_config(config: &BackendConfig) -> Option<Self> {
        config
            .base_url()
            .map(|url| Self::new(url, config.api_key.clone(), config.model.clone()))
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

fn summary_prompt(max_words: u32, min_words: u32) -> String {
    format!(
        "Summarize the user's transcript in the same language it is written in. \
         Use between {min_words} and {max_words} words. \
         Reply with the summary only."
    )
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn summarize(
        &self,
        text: &str,
        max_words: u32,
        min_words: u32,
    ) -> Result<String, BackendError> {
        let body = serde_json::json!({
            "model": self.model,
            "temperature": 0,
            // Words run ~1.3 tokens; leave headroom.
            "max_tokens": max_words * 2,
            "messages": [
                { "role": "system", "content": summary_prompt(max_words, min_words) },
                { "role": "user", "content": text },
            ],
        });

        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model = %self.model, chars = text.len(), "sending summarization request");

        let mut req = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            warn!(status, body = %message, "summarization API error");
            return Err(BackendError::Api { status, message });
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| BackendError::Parse("no choices in chat completion".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn whisper_sends_model_and_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_string_contains("whisper-1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": " hello "})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let t = WhisperApiTranscriber::new(&server.uri(), Some("sk-test".into()), None);
        let text = t.transcribe(b"OggS".to_vec(), "a.ogg").await.unwrap();
        assert_eq!(text, " hello ");
    }

    #[tokio::test]
    async fn whisper_api_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad audio"))
            .mount(&server)
            .await;

        let t = WhisperApiTranscriber::new(&server.uri(), None, None);
        match t.transcribe(vec![0], "a.ogg").await {
            Err(BackendError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "bad audio");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_summarizer_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({"model": "local-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "  short  " } }]
            })))
            .mount(&server)
            .await;

        let s = ChatSummarizer::new(&server.uri(), None, Some("local-model".into()));
        assert_eq!(s.summarize("long text", 150, 30).await.unwrap(), "short");
    }

    #[tokio::test]
    async fn chat_summarizer_without_choices_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let s = ChatSummarizer::new(&server.uri(), None, None);
        assert!(matches!(
            s.summarize("x", 150, 30).await,
            Err(BackendError::Parse(_))
        ));
    }

    #[test]
    fn backend_without_url_is_not_built() {
        assert!(WhisperApiTranscriber::from_config(&BackendConfig::default()).is_none());
        assert!(ChatSummarizer::from_config(&BackendConfig::default()).is_none());
    }

    #[test]
    fn prompt_mentions_bounds() {
        let p = summary_prompt(150, 30);
        assert!(p.contains("between 30 and 150 words"));
    }
}
