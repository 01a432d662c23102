//! Typed inbound-message model.
//!
//! Built at the ingestion boundary from the raw platform message, so the
//! addressing and pipeline code never sees platform types. All optionality
//! is explicit — no field is "maybe there" without an `Option`.

use serde::{Deserialize, Serialize};

/// Whether a conversation is one-to-one or a group of any size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
}

/// Sender identity as the platform reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sender {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
}

impl Sender {
    /// Display name for prompts and logs: username, else first name,
    /// else last name, else a fixed placeholder.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.first_name.as_deref())
            .or(self.last_name.as_deref())
            .unwrap_or("Unknown")
    }
}

/// A structured `@mention` annotation on the message text.
///
/// `offset` and `length` are UTF-16 code units, as the Telegram Bot API
/// defines entity positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionSpan {
    pub offset: usize,
    pub length: usize,
}

/// Reference to the message this one replies to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplyRef {
    pub sender_username: Option<String>,
}

/// One inbound message, normalized from the platform shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub chat_kind: ChatKind,
    pub sender: Sender,
    /// Message text; empty string when the platform delivered none.
    pub text: String,
    /// Mention annotations only — other entity kinds are dropped at ingestion.
    pub mentions: Vec<MentionSpan>,
    pub reply_to: Option<ReplyRef>,
}

impl InboundMessage {
    /// Slice of `text` covered by a mention span.
    ///
    /// Spans are UTF-16 offsets, so the text is re-encoded before slicing.
    /// Returns `None` when the span falls outside the text.
    pub fn mention_text(&self, span: &MentionSpan) -> Option<String> {
        let units: Vec<u16> = self.text.encode_utf16().collect();
        let end = span.offset.checked_add(span.length)?;
        if end > units.len() {
            return None;
        }
        String::from_utf16(&units[span.offset..end]).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(text: &str) -> InboundMessage {
        InboundMessage {
            chat_id: 1,
            chat_kind: ChatKind::Group,
            sender: Sender::default(),
            text: text.to_string(),
            mentions: Vec::new(),
            reply_to: None,
        }
    }

    #[test]
    fn display_name_prefers_username() {
        let sender = Sender {
            username: Some("alice".into()),
            first_name: Some("Alice".into()),
            last_name: Some("Smith".into()),
            is_bot: false,
        };
        assert_eq!(sender.display_name(), "alice");
    }

    #[test]
    fn display_name_falls_back_in_order() {
        let sender = Sender {
            first_name: Some("Alice".into()),
            last_name: Some("Smith".into()),
            ..Sender::default()
        };
        assert_eq!(sender.display_name(), "Alice");

        let sender = Sender {
            last_name: Some("Smith".into()),
            ..Sender::default()
        };
        assert_eq!(sender.display_name(), "Smith");

        assert_eq!(Sender::default().display_name(), "Unknown");
    }

    #[test]
    fn mention_text_ascii() {
        let m = msg("hey @gaia_bot hello");
        let span = MentionSpan {
            offset: 4,
            length: 9,
        };
        assert_eq!(m.mention_text(&span).as_deref(), Some("@gaia_bot"));
    }

    #[test]
    fn mention_text_utf16_offsets() {
        // '🌍' is 2 UTF-16 code units; a byte-based slice would misplace
        // the mention.
        let m = msg("🌍 @gaia_bot");
        let span = MentionSpan {
            offset: 3,
            length: 9,
        };
        assert_eq!(m.mention_text(&span).as_deref(), Some("@gaia_bot"));
    }

    #[test]
    fn mention_text_out_of_range_is_none() {
        let m = msg("short");
        let span = MentionSpan {
            offset: 3,
            length: 99,
        };
        assert_eq!(m.mention_text(&span), None);
    }
}
