/// Errors produced by the Telegram adapter.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("no bot token configured (set BOT_TOKEN)")]
    NoToken,
}
