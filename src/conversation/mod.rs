//! Conversation types and the display/chain format conversion
//!
//! The chat widget renders the conversation as rows of (user, assistant)
//! bubbles; the prompt assembly for the model wants a flat, role-tagged
//! message list. Both shapes live here, along with the pure conversion
//! between them.

use serde::{Deserialize, Serialize};

/// One rendered exchange: what the user typed and what the persona answered.
///
/// Both fields are required; a history entry missing either side is a
/// malformed request and is rejected at the serde boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTurn {
    pub user: String,
    pub assistant: String,
}

impl DisplayTurn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// Role of a chain-shape message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainRole {
    Human,
    Ai,
}

/// A single role-tagged message in the shape prompt assembly expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainMessage {
    pub role: ChainRole,
    pub text: String,
}

impl ChainMessage {
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: ChainRole::Human,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: ChainRole::Ai,
            text: text.into(),
        }
    }
}

/// Flattens display-shape turns into chain-shape messages.
///
/// Each turn becomes one human message followed by one ai message, so the
/// output is always twice the length of the input, in input order.
pub fn chain_messages(history: &[DisplayTurn]) -> Vec<ChainMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2);
    for turn in history {
        messages.push(ChainMessage::human(turn.user.clone()));
        messages.push(ChainMessage::ai(turn.assistant.clone()));
    }
    messages
}

/// Re-pairs chain-shape messages into display turns.
///
/// A human message opens a turn and the ai message that follows closes it.
/// An unpaired message leaves the other side of its turn empty, so the
/// function is total over any role sequence.
pub fn display_turns(messages: &[ChainMessage]) -> Vec<DisplayTurn> {
    let mut turns: Vec<DisplayTurn> = Vec::with_capacity(messages.len() / 2 + 1);
    let mut open = false;

    for message in messages {
        match message.role {
            ChainRole::Human => {
                turns.push(DisplayTurn::new(message.text.clone(), ""));
                open = true;
            }
            ChainRole::Ai => {
                if open {
                    if let Some(turn) = turns.last_mut() {
                        turn.assistant = message.text.clone();
                    }
                    open = false;
                } else {
                    turns.push(DisplayTurn::new("", message.text.clone()));
                }
            }
        }
    }

    turns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> Vec<DisplayTurn> {
        vec![
            DisplayTurn::new("What is relativity?", "Ah, my famous theory! Let me tell you..."),
            DisplayTurn::new("Tell me more", "Fine, but you're testing my patience..."),
        ]
    }

    #[test]
    fn empty_history_converts_to_empty_messages() {
        assert!(chain_messages(&[]).is_empty());
    }

    #[test]
    fn conversion_doubles_length_and_alternates_roles() {
        let history = sample_history();
        let messages = chain_messages(&history);

        assert_eq!(messages.len(), 2 * history.len());
        for (i, message) in messages.iter().enumerate() {
            let expected = if i % 2 == 0 {
                ChainRole::Human
            } else {
                ChainRole::Ai
            };
            assert_eq!(message.role, expected);
        }
    }

    #[test]
    fn conversion_preserves_text_and_order() {
        let messages = chain_messages(&sample_history());

        assert_eq!(messages[0].text, "What is relativity?");
        assert_eq!(messages[1].text, "Ah, my famous theory! Let me tell you...");
        assert_eq!(messages[2].text, "Tell me more");
        assert_eq!(messages[3].text, "Fine, but you're testing my patience...");
    }

    #[test]
    fn round_trip_preserves_content() {
        let history = sample_history();
        let round_tripped = display_turns(&chain_messages(&history));
        assert_eq!(round_tripped, history);
    }

    #[test]
    fn empty_strings_survive_conversion() {
        let history = vec![DisplayTurn::new("", "")];
        let messages = chain_messages(&history);

        assert_eq!(messages.len(), 2);
        assert_eq!(display_turns(&messages), history);
    }

    #[test]
    fn unpaired_human_message_yields_half_open_turn() {
        let messages = vec![ChainMessage::human("Hello?")];
        let turns = display_turns(&messages);

        assert_eq!(turns, vec![DisplayTurn::new("Hello?", "")]);
    }

    #[test]
    fn turn_missing_a_field_is_rejected() {
        let err = serde_json::from_str::<DisplayTurn>(r#"{"user": "Hi"}"#);
        assert!(err.is_err());

        let err = serde_json::from_str::<DisplayTurn>(r#"{"assistant": "Hello."}"#);
        assert!(err.is_err());
    }

    #[test]
    fn chain_roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChainMessage::human("Hi")).unwrap();
        assert_eq!(json, r#"{"role":"human","text":"Hi"}"#);

        let json = serde_json::to_string(&ChainMessage::ai("Hello.")).unwrap();
        assert_eq!(json, r#"{"role":"ai","text":"Hello."}"#);
    }
}
