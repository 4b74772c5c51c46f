use async_trait::async_trait;

/// Errors from a model backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Speech-to-text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    fn name(&self) -> &str;

    /// Transcribe an audio or video container. Returns the raw text.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, BackendError>;
}

/// Text summarization.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    /// Summarize `text` in roughly `min_words..=max_words` words.
    async fn summarize(
        &self,
        text: &str,
        max_words: u32,
        min_words: u32,
    ) -> Result<String, BackendError>;
}
