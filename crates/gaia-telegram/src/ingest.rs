//! Ingestion boundary: raw teloxide messages → the typed inbound model.
//!
//! Everything downstream (addressing, command routing, the pipeline) works
//! on `gaia_core::types::InboundMessage`; platform types stop here.

use gaia_core::types::{ChatKind, InboundMessage, MentionSpan, ReplyRef, Sender};
use teloxide::types::{Message, MessageEntityKind};

/// Normalize a Telegram message.
///
/// Returns `None` for messages without a sender profile (channel posts,
/// service messages) — those are dropped before any addressing decision.
pub fn from_telegram(msg: &Message) -> Option<InboundMessage> {
    let from = msg.from.as_ref()?;

    let sender = Sender {
        username: from.username.clone(),
        first_name: non_empty(&from.first_name),
        last_name: from.last_name.clone(),
        is_bot: from.is_bot,
    };

    let text = msg.text().unwrap_or("").to_string();

    let mentions = msg
        .entities()
        .unwrap_or_default()
        .iter()
        .filter(|e| matches!(e.kind, MessageEntityKind::Mention))
        .map(|e| MentionSpan {
            offset: e.offset,
            length: e.length,
        })
        .collect();

    let reply_to = msg.reply_to_message().map(|replied| ReplyRef {
        sender_username: replied
            .from
            .as_ref()
            .and_then(|u| u.username.clone()),
    });

    Some(InboundMessage {
        chat_id: msg.chat.id.0,
        chat_kind: if msg.chat.is_private() {
            ChatKind::Private
        } else {
            ChatKind::Group
        },
        sender,
        text,
        mentions,
        reply_to,
    })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
