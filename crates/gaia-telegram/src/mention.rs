//! Addressing decision: does an inbound message warrant a reply?
//!
//! Pure function over the typed message plus the agent's handle. Private
//! chats always respond; groups require a mention annotation, a raw
//! `@handle` substring, or a reply to one of the agent's own messages.
//! All matching is case-sensitive, as Telegram usernames are delivered.

use gaia_core::types::{ChatKind, InboundMessage};

/// Returns `true` when the agent should respond to `msg`.
///
/// `handle` is `None` while startup identity resolution is pending; in that
/// state every non-private message is dropped (fail closed). Missing text,
/// annotations, or reply references count as "no match", never as errors.
pub fn should_respond(msg: &InboundMessage, handle: Option<&str>) -> bool {
    if msg.chat_kind == ChatKind::Private {
        return true;
    }
    let Some(handle) = handle else {
        return false;
    };
    let tagged = format!("@{handle}");

    // Structured mention annotations, sliced by the platform's UTF-16 offsets.
    if msg
        .mentions
        .iter()
        .any(|span| msg.mention_text(span).as_deref() == Some(tagged.as_str()))
    {
        return true;
    }

    // Raw-text fallback for clients that omit entity annotations.
    if msg.text.contains(&tagged) {
        return true;
    }

    // Reply to one of the agent's own messages.
    msg.reply_to
        .as_ref()
        .and_then(|r| r.sender_username.as_deref())
        == Some(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaia_core::types::{MentionSpan, ReplyRef, Sender};

    const HANDLE: &str = "gaia_bot";

    fn group_msg(text: &str) -> InboundMessage {
        InboundMessage {
            chat_id: -100,
            chat_kind: ChatKind::Group,
            sender: Sender::default(),
            text: text.to_string(),
            mentions: Vec::new(),
            reply_to: None,
        }
    }

    #[test]
    fn private_chat_always_responds() {
        let mut msg = group_msg("no mention anywhere");
        msg.chat_kind = ChatKind::Private;
        assert!(should_respond(&msg, Some(HANDLE)));
        // Even before the handle is known.
        assert!(should_respond(&msg, None));
    }

    #[test]
    fn unknown_handle_fails_closed_in_groups() {
        let msg = group_msg("@gaia_bot hello");
        assert!(!should_respond(&msg, None));
    }

    #[test]
    fn group_without_any_match_is_ignored() {
        let msg = group_msg("just chatting");
        assert!(!should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn entity_mention_matches_exactly() {
        let mut msg = group_msg("@gaia_bot what is the forest?");
        msg.mentions.push(MentionSpan {
            offset: 0,
            length: 9,
        });
        assert!(should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn entity_mention_wins_despite_case_mismatched_text_elsewhere() {
        // The annotation covers the exact handle; the tail has a lookalike
        // with different case that must not be what grants the match.
        let mut msg = group_msg("@gaia_bot see also @GAIA_BOT");
        msg.mentions.push(MentionSpan {
            offset: 0,
            length: 9,
        });
        assert!(should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn entity_for_other_user_does_not_match() {
        let mut msg = group_msg("@someone_else hi");
        msg.mentions.push(MentionSpan {
            offset: 0,
            length: 13,
        });
        assert!(!should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn raw_substring_fallback_matches_without_entities() {
        let msg = group_msg("hey @gaia_bot, you there?");
        assert!(should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn raw_substring_is_case_sensitive() {
        let msg = group_msg("hey @GAIA_BOT");
        assert!(!should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn reply_to_agent_matches() {
        let mut msg = group_msg("continuing the thread");
        msg.reply_to = Some(ReplyRef {
            sender_username: Some(HANDLE.to_string()),
        });
        assert!(should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn reply_to_someone_else_does_not_match() {
        let mut msg = group_msg("continuing the thread");
        msg.reply_to = Some(ReplyRef {
            sender_username: Some("other_bot".to_string()),
        });
        assert!(!should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn reply_without_sender_username_is_no_match() {
        let mut msg = group_msg("continuing the thread");
        msg.reply_to = Some(ReplyRef {
            sender_username: None,
        });
        assert!(!should_respond(&msg, Some(HANDLE)));
    }

    #[test]
    fn empty_text_in_group_is_no_match() {
        let msg = group_msg("");
        assert!(!should_respond(&msg, Some(HANDLE)));
    }
}
