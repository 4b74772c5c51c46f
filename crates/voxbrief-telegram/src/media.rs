//! Telegram side of the media relay.
//!
//! Resolves a file id with `get_file`, streams it to the scratch path with
//! `download_file`, and shows the typing indicator while the relay works.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use tokio::io::AsyncWriteExt;
use tracing::warn;
use voxbrief_relay::{MediaTransport, RelayError, WorkingIndicator};

use crate::typing;

#[derive(Clone)]
pub struct TelegramMedia {
    bot: Bot,
    typing_interval: Duration,
}

impl TelegramMedia {
    pub fn new(bot: Bot, typing_interval: Duration) -> Self {
        Self {
            bot,
            typing_interval,
        }
    }
}

#[async_trait]
impl MediaTransport for TelegramMedia {
    async fn download(&self, file_id: &str, dest: &Path) -> Result<(), RelayError> {
        let file = self.bot.get_file(file_id).await.map_err(|e| {
            warn!(file_id, error = %e, "Telegram: get_file failed");
            RelayError::Unexpected(format!("get_file failed: {e}"))
        })?;

        let mut out = tokio::fs::File::create(dest).await?;
        self.bot
            .download_file(&file.path, &mut out)
            .await
            .map_err(|e| {
                warn!(file_id, error = %e, "Telegram: download_file failed");
                RelayError::Unexpected(format!("download failed: {e}"))
            })?;
        out.flush().await?;
        Ok(())
    }

    fn working(&self, chat_id: i64) -> WorkingIndicator {
        typing::start(self.bot.clone(), ChatId(chat_id), self.typing_interval)
    }
}
