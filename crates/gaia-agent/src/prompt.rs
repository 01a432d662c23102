//! Prompt assembly — pure projection of knowledge + bounded history + the
//! current message into a two-unit completion request.

use gaia_memory::{recent_window, Turn};

use crate::provider::{ChatMessage, ChatRole};

/// Fixed behavioral rules, prepended to every system unit.
const SYSTEM_RULES: &str = "\
You are GAI — the cheerful, whimsical companion AI of Gaia.

RULES:
- Address users personally by name.
- Be warm, positive, and whimsical.
- Stay inside the Gaia knowledge base.
- Do not invent lore.
- Provide clear and helpful replies.";

/// Build the completion request body: one system unit (rules + knowledge +
/// recent-memory transcript) and one user unit carrying `user_text` verbatim.
pub fn build_prompt(
    user_text: &str,
    history: &[Turn],
    knowledge: &str,
    window: usize,
) -> Vec<ChatMessage> {
    let transcript = render_transcript(recent_window(history, window));

    let system = format!(
        "{SYSTEM_RULES}\n\nKNOWLEDGE:\n{knowledge}\n\nRECENT MEMORY:\n{transcript}"
    );

    vec![
        ChatMessage {
            role: ChatRole::System,
            content: system,
        },
        ChatMessage {
            role: ChatRole::User,
            content: user_text.to_string(),
        },
    ]
}

/// One line per turn, oldest first: `ROLE(name): text`, the `(name)` part
/// omitted for turns without a speaker name.
fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| {
            let name_tag = turn
                .name
                .as_deref()
                .map(|n| format!("({n})"))
                .unwrap_or_default();
            format!(
                "{}{}: {}",
                turn.role.to_string().to_uppercase(),
                name_tag,
                turn.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
