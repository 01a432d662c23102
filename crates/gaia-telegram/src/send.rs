//! Plain-text sending with Telegram's 4096-character message cap.
//!
//! Replies (knowledge-heavy answers, `/sol tx` JSON dumps) can exceed the
//! cap, so text is split on line boundaries at 4090 characters and sent as
//! consecutive messages with a small gap to stay under rate limits.

use std::time::Duration;

use teloxide::prelude::*;
use tracing::warn;

/// Maximum characters per message (Telegram's limit is 4096; 4090 for safety).
const CHUNK_MAX: usize = 4090;

/// Split `text` into chunks of at most `CHUNK_MAX` characters, preferring
/// line boundaries. A single line longer than the cap is force-split.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        let cost = if current.is_empty() {
            line.len()
        } else {
            1 + line.len()
        };
        if !current.is_empty() && current.len() + cost > CHUNK_MAX {
            chunks.push(std::mem::take(&mut current));
        }

        if line.len() > CHUNK_MAX {
            // Oversized single line: flush and hard-split on spaces if possible.
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let mut remaining = line;
            while remaining.len() > CHUNK_MAX {
                // The cap is a byte count; back off to a char boundary so
                // multibyte text never gets sliced mid-character.
                let mut cap = CHUNK_MAX;
                while !remaining.is_char_boundary(cap) {
                    cap -= 1;
                }
                let split_at = match remaining[..cap].rfind(' ') {
                    Some(i) if i > 0 => i,
                    _ => cap,
                };
                chunks.push(remaining[..split_at].to_string());
                remaining = remaining[split_at..].trim_start();
            }
            current.push_str(remaining);
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Send `text` to `chat_id` as one or more chunked messages.
///
/// Send failures are logged and swallowed — there is nothing useful to do
/// with a failed reply beyond recording it.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, text: &str) {
    let chunks = split_chunks(text);
    for (i, chunk) in chunks.iter().enumerate() {
        if let Err(e) = bot.send_message(chat_id, chunk).await {
            warn!(error = %e, chunk_index = i, %chat_id, "failed to send reply chunk");
        }
        if i + 1 < chunks.len() {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}
