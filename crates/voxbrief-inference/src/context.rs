//! Service context shared by every request handler.
//!
//! Built once at startup from config and held for the process lifetime
//! behind an `Arc`. A missing backend leaves its slot empty; `/process`
//! then answers 503.

use std::sync::Arc;

use voxbrief_core::config::{InferenceConfig, SummaryPolicy};

use crate::backend::{Summarizer, Transcriber};
use crate::openai::{ChatSummarizer, WhisperApiTranscriber};

pub struct ServiceContext {
    pub transcriber: Option<Arc<dyn Transcriber>>,
    pub summarizer: Option<Arc<dyn Summarizer>>,
    pub policy: SummaryPolicy,
}

impl ServiceContext {
    pub fn new(
        transcriber: Option<Arc<dyn Transcriber>>,
        summarizer: Option<Arc<dyn Summarizer>>,
        policy: SummaryPolicy,
    ) -> Self {
        Self {
            transcriber,
            summarizer,
            policy,
        }
    }

    pub fn from_config(config: &InferenceConfig) -> Self {
        let transcriber = WhisperApiTranscriber::from_config(&config.transcriber)
            .map(|t| Arc::new(t) as Arc<dyn Transcriber>);
        let summarizer = ChatSummarizer::from_config(&config.summarizer)
            .map(|s| Arc::new(s) as Arc<dyn Summarizer>);
        Self::new(transcriber, summarizer, config.summary)
    }

    /// Both backends, or `None` if either is missing.
    pub fn models(&self) -> Option<(&dyn Transcriber, &dyn Summarizer)> {
        match (&self.transcriber, &self.summarizer) {
            (Some(t), Some(s)) => Some((t.as_ref(), s.as_ref())),
            _ => None,
        }
    }

    pub fn models_loaded(&self) -> bool {
        self.models().is_some()
    }
}
