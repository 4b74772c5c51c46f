//! Telegram message handler registered in the teloxide Dispatcher.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;
use voxbrief_core::config::BotConfig;
use voxbrief_relay::{respond, MediaRelay};

use crate::inbound;
use crate::media::TelegramMedia;
use crate::send;

/// Runs for every incoming `Message`:
/// 1. Bot-message filter
/// 2. Classification into an `InboundMessage`
/// 3. Text and other content: reply inline
/// 4. Media: relay in a spawned task so a slow inference call never holds up
///    the dispatcher
///
/// Exactly one reply per message. Relay failures are absorbed into the reply
/// text, so the only errors reaching the dispatcher are transport ones.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    relay: Arc<MediaRelay>,
    config: BotConfig,
) -> ResponseResult<()> {
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(false) {
        return Ok(());
    }

    let inbound = inbound::classify(&msg);
    info!(
        sender = %inbound.sender_name,
        sender_id = inbound.sender_id,
        chat_id = inbound.chat_id,
        kind = %inbound.kind,
        "Telegram: message received"
    );

    let transport = TelegramMedia::new(bot.clone(), config.typing_interval());
    let chat_id = msg.chat.id;

    if !inbound.kind.is_media() {
        let reply = respond(&inbound, &relay, &transport).await;
        send::send_response(&bot, chat_id, &reply).await;
        return Ok(());
    }

    tokio::spawn(async move {
        let reply = respond(&inbound, &relay, &transport).await;
        send::send_response(&bot, chat_id, &reply).await;
    });

    Ok(())
}
