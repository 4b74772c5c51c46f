//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling loop
//! until the process is interrupted.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;
use voxbrief_core::config::BotConfig;
use voxbrief_relay::MediaRelay;

use crate::error::TelegramError;
use crate::handler::handle_message;

pub struct TelegramAdapter {
    token: String,
    config: BotConfig,
    relay: Arc<MediaRelay>,
}

impl TelegramAdapter {
    /// Fails with `NoToken` when `BOT_TOKEN` is unset or blank.
    pub fn new(config: &BotConfig, relay: Arc<MediaRelay>) -> Result<Self, TelegramError> {
        let token = config.bot_token().map_err(|_| TelegramError::NoToken)?;
        Ok(Self {
            token: token.to_string(),
            config: config.clone(),
            relay,
        })
    }

    /// Connect to Telegram and drive the long-polling loop until Ctrl-C.
    ///
    /// Handler errors go to the dispatcher's error handler, which only logs;
    /// no update is ever retried.
    pub async fn run(self) {
        let bot = Bot::new(&self.token);

        info!(
            relay_enabled = self.relay.is_configured(),
            "Telegram: starting long-polling dispatcher"
        );

        let handler = Update::filter_message().endpoint(handle_message);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![self.relay, self.config])
            .default_handler(|_upd| async {})
            .error_handler(LoggingErrorHandler::with_custom_text(
                "Telegram: error while handling update",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram: dispatcher stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxbrief_core::Templates;

    #[test]
    fn missing_token_is_rejected() {
        let config = BotConfig::default();
        let relay = Arc::new(MediaRelay::from_config(&config, &Templates::default()));
        assert!(matches!(
            TelegramAdapter::new(&config, relay),
            Err(TelegramError::NoToken)
        ));
    }

    #[test]
    fn token_is_taken_from_config() {
        let config = BotConfig {
            bot_token: Some(" 123:abc ".into()),
            ..BotConfig::default()
        };
        let relay = Arc::new(MediaRelay::from_config(&config, &Templates::default()));
        let adapter = TelegramAdapter::new(&config, relay).unwrap();
        assert_eq!(adapter.token, "123:abc");
    }
}
