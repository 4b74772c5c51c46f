//! Telegram typing indicator: re-sends `sendChatAction` until stopped.
//!
//! Telegram drops the typing status after ~5 seconds, so the loop refreshes it
//! on a shorter interval for as long as the relay is working.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ChatAction;
use tracing::debug;
use voxbrief_relay::WorkingIndicator;

/// Spawn the typing loop for `chat_id`. Dropping the returned handle ends it.
///
/// Send failures are logged at debug and otherwise ignored.
pub fn start(bot: Bot, chat_id: ChatId, interval: Duration) -> WorkingIndicator {
    let handle = tokio::spawn(async move {
        loop {
            if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
                debug!(chat_id = chat_id.0, error = %e, "Telegram: chat action failed");
            }
            tokio::time::sleep(interval).await;
        }
    });
    WorkingIndicator::from_task(handle)
}
