//! Media relay: download → inference → summary.
//!
//! One call handles one inbound media message end to end. The relay holds no
//! mutable state, so a single `Arc<MediaRelay>` serves every concurrent message.

use std::path::PathBuf;

use tracing::{info, warn};
use voxbrief_core::config::BotConfig;
use voxbrief_core::{InboundMessage, MediaKind, RelaySummary, Templates};

use crate::client::InferenceClient;
use crate::error::RelayError;
use crate::scratch::ScratchFile;
use crate::transport::MediaTransport;

pub struct MediaRelay {
    client: Option<InferenceClient>,
    scratch_dir: PathBuf,
    templates: Templates,
}

impl MediaRelay {
    pub fn new(client: Option<InferenceClient>, scratch_dir: PathBuf, templates: Templates) -> Self {
        Self {
            client,
            scratch_dir,
            templates,
        }
    }

    /// Build from the `[bot]` config section. No client when `ml_server_url` is unset.
    pub fn from_config(bot: &BotConfig, templates: &Templates) -> Self {
        let client = bot.ml_server_url().map(|url| {
            InferenceClient::new(url, bot.request_timeout(), &templates.missing_summary)
        });
        Self::new(client, bot.scratch_dir(), templates.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Option<&InferenceClient> {
        self.client.as_ref()
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Relay one media message to the inference endpoint.
    ///
    /// The scratch file and the working indicator are both released when this
    /// returns, whatever the outcome.
    pub async fn relay(
        &self,
        msg: &InboundMessage,
        transport: &dyn MediaTransport,
    ) -> Result<RelaySummary, RelayError> {
        let Some(client) = self.client.as_ref() else {
            return Err(RelayError::NotConfigured);
        };

        let _working = transport.working(msg.chat_id);

        let kind = MediaKind::try_from(&msg.kind)?;
        let file_id = msg
            .payload_ref
            .as_deref()
            .ok_or_else(|| RelayError::UnsupportedKind(format!("{kind} without file reference")))?;

        let scratch = ScratchFile::new(&self.scratch_dir, file_id, kind);
        transport.download(file_id, scratch.path()).await?;
        info!(
            chat_id = msg.chat_id,
            file_id,
            media_type = kind.as_str(),
            path = %scratch.path().display(),
            "media downloaded, sending to inference"
        );

        client.process(&scratch).await
    }

    /// Map a relay outcome to the single reply sent back to the chat.
    pub fn reply_for(&self, outcome: &Result<RelaySummary, RelayError>) -> String {
        let t = &self.templates;
        match outcome {
            Ok(summary) => summary.summary_text.clone(),
            Err(RelayError::NotConfigured) => t.not_configured.clone(),
            Err(RelayError::UnsupportedKind(_)) => t.unsupported.clone(),
            Err(RelayError::Unreachable(_)) => t.unreachable.clone(),
            Err(RelayError::Timeout { .. }) => t.timeout.clone(),
            Err(RelayError::ServerError { .. }) => t.server_error.clone(),
            Err(RelayError::Unexpected(_)) => t.unexpected.clone(),
        }
    }

    /// Relay and convert to a reply. Errors are logged here and never escape.
    pub async fn relay_reply(&self, msg: &InboundMessage, transport: &dyn MediaTransport) -> String {
        let outcome = self.relay(msg, transport).await;
        match &outcome {
            Ok(summary) => info!(
                chat_id = msg.chat_id,
                kind = %msg.kind,
                transcript_len = summary.transcribed_text.as_deref().map(str::len).unwrap_or(0),
                "media summarized"
            ),
            Err(RelayError::NotConfigured) => {
                warn!(chat_id = msg.chat_id, "media received but inference is not configured")
            }
            Err(e) => warn!(
                chat_id = msg.chat_id,
                kind = %msg.kind,
                code = e.code(),
                error = %e,
                "media relay failed"
            ),
        }
        self.reply_for(&outcome)
    }
}
