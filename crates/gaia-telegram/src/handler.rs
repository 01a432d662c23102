//! Telegram message handler registered in the teloxide Dispatcher.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{debug, info};

use gaia_agent::pipeline::{command, process};
use gaia_core::identity::AgentIdentity;

use crate::context::TelegramAppContext;
use crate::ingest;
use crate::mention;
use crate::send;
use crate::typing::TypingHandle;

/// Main message handler. Runs for every incoming `Message`:
/// 1. Identity gate — drop everything until the agent handle is resolved.
/// 2. Ingestion into the typed inbound model; bot senders dropped.
/// 3. Addressing decision (private chat, mention, or reply-to-agent).
/// 4. Command interception — `/sol` replies short-circuit the pipeline
///    and never touch memory.
/// 5. Completion pipeline in a spawned task so slow completions never
///    block other conversations; a typing indicator runs meanwhile.
pub async fn handle_message<C: TelegramAppContext + 'static>(
    bot: Bot,
    msg: Message,
    ctx: Arc<C>,
    identity: Arc<AgentIdentity>,
) -> ResponseResult<()> {
    let Some(handle) = identity.handle() else {
        debug!("agent identity unresolved, dropping message");
        return Ok(());
    };

    let Some(inbound) = ingest::from_telegram(&msg) else {
        return Ok(());
    };
    if inbound.sender.is_bot {
        return Ok(());
    }
    let speaker = inbound.sender.display_name().to_string();

    if !mention::should_respond(&inbound, Some(handle)) {
        debug!(chat_id = inbound.chat_id, speaker = %speaker, "not addressed, ignoring");
        return Ok(());
    }

    info!(chat_id = inbound.chat_id, speaker = %speaker, "message accepted");

    if let Some(invocation) = command::parse(&inbound.text) {
        let reply = command::dispatch(&invocation, ctx.ledger(), &speaker).await;
        send::send_reply(&bot, msg.chat.id, &reply).await;
        return Ok(());
    }

    if inbound.text.is_empty() {
        return Ok(());
    }

    let chat_id = msg.chat.id;
    tokio::spawn(async move {
        let typing = TypingHandle::start(bot.clone(), chat_id);
        let reply =
            process::process_message(ctx.as_ref(), inbound.chat_id, &speaker, &inbound.text).await;
        typing.stop();
        send::send_reply(&bot, chat_id, &reply).await;
    });

    Ok(())
}
