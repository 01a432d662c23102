//! Completion pipeline — shared by any channel adapter.
//!
//! `process_message` runs one full non-command interaction: take the
//! conversation lock → load history → build the prompt → call the
//! completion provider → append both turns → save → return the reply.
//!
//! This function never fails: a provider error is replaced by a fixed
//! fallback reply, and a save error is logged without blocking the reply.

use gaia_memory::Turn;
use tracing::{error, info, warn};

use crate::prompt::build_prompt;
use crate::provider::CompletionRequest;

use super::MessageContext;

/// Fixed apology sent when the completion service fails.
pub const FALLBACK_REPLY: &str = "Oops — Gaia's spark flickered. Try again!";

/// Run one conversational interaction and return the reply text.
///
/// The per-conversation lock is held for the whole interaction, so a second
/// message for the same chat cannot read stale history mid-flight. Other
/// conversations proceed concurrently.
pub async fn process_message<C: MessageContext>(
    ctx: &C,
    chat_id: i64,
    speaker: &str,
    text: &str,
) -> String {
    let _guard = ctx.memory().lock(chat_id).await;

    let mut turns = ctx.memory().load(chat_id);
    let messages = build_prompt(text, &turns, ctx.knowledge().as_str(), ctx.memory_window());
    let request = CompletionRequest {
        model: ctx.model().to_string(),
        messages,
        max_tokens: ctx.max_tokens(),
    };

    let reply = match ctx.provider().complete(&request).await {
        Ok(resp) => {
            info!(
                chat_id,
                model = %resp.model,
                tokens_in = resp.tokens_in,
                tokens_out = resp.tokens_out,
                "completion finished"
            );
            resp.content
        }
        Err(e) => {
            warn!(chat_id, provider = ctx.provider().name(), error = %e, "completion failed, sending fallback");
            FALLBACK_REPLY.to_string()
        }
    };

    // Both turns are appended whether the provider succeeded or not, so the
    // transcript never ends on a dangling user turn.
    turns.push(Turn::user(speaker, text));
    turns.push(Turn::assistant(&reply));
    if let Err(e) = ctx.memory().save(chat_id, &turns) {
        // Reply still goes out; this interaction is just lost from memory.
        error!(chat_id, error = %e, "memory save failed");
    }

    reply
}
