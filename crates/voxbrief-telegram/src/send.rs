//! Reply sending for the Telegram adapter.
//!
//! Telegram caps a message at 4096 characters (UTF-16 units), so long replies
//! are split on line or word boundaries. Each chunk goes out as fully escaped
//! MarkdownV2, which renders the text exactly as written; if Telegram rejects
//! it the chunk is re-sent as plain text.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::warn;

/// Characters per chunk, counted as `char`s. Leaves room below the 4096 limit
/// for astral-plane characters that count twice in UTF-16.
const CHUNK_MAX: usize = 4000;

/// Split `text` into chunks of at most `CHUNK_MAX` chars.
///
/// Prefers the last newline, then the last space, inside the window; falls
/// back to a hard split. Never splits inside a UTF-8 sequence.
pub fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > CHUNK_MAX {
        // Byte offset of the char just past the window.
        let window_end = rest
            .char_indices()
            .nth(CHUNK_MAX)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let window = &rest[..window_end];

        let cut = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .filter(|&i| i > 0)
            .unwrap_or(window_end);

        chunks.push(rest[..cut].to_string());
        rest = rest[cut..].trim_start_matches(['\n', ' ']);
    }

    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Escape every MarkdownV2 special character so the text renders literally.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        if matches!(
            ch,
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '='
                | '|' | '{' | '}' | '.' | '!'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Send `text` to `chat_id`, chunked, MarkdownV2 first with plain-text fallback.
///
/// Failures are logged and swallowed; the caller has nothing left to try.
pub async fn send_response(bot: &Bot, chat_id: ChatId, text: &str) {
    let chunks = split_chunks(text);
    for (i, chunk) in chunks.iter().enumerate() {
        let sent = bot
            .send_message(chat_id, escape_markdown_v2(chunk))
            .parse_mode(ParseMode::MarkdownV2)
            .await;

        if sent.is_err() {
            if let Err(e) = bot.send_message(chat_id, chunk).await {
                warn!(chat_id = chat_id.0, error = %e, chunk_index = i, "Telegram: failed to send reply");
            }
        }

        // Stay clear of per-chat rate limits.
        if i + 1 < chunks.len() {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}
