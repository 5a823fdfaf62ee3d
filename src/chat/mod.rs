//! The conversational chain
//!
//! [`ChatChain`] binds a persona to a completion backend and runs one
//! turn at a time: convert the displayed history to chain shape, add the
//! newest user message, ask the model, hand back an extended history.
//! There is no state in between turns; callers thread the history through.

use std::sync::Arc;

use thiserror::Error;

use crate::config::Persona;
use crate::conversation::{chain_messages, ChainMessage, DisplayTurn};
use crate::providers::{CompletionModel, ProviderError};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

pub struct ChatChain {
    persona: Persona,
    model: Arc<dyn CompletionModel>,
}

impl ChatChain {
    pub fn new(persona: Persona, model: Arc<dyn CompletionModel>) -> Self {
        Self { persona, model }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Runs one conversational turn.
    ///
    /// The caller's history is only borrowed; the returned vector is a
    /// fresh copy with exactly one turn appended at the end. A backend
    /// failure propagates as-is, with no retry and no fallback text.
    pub async fn send_turn(
        &self,
        user_text: &str,
        history: &[DisplayTurn],
    ) -> Result<Vec<DisplayTurn>, ChatError> {
        let mut messages = chain_messages(history);
        messages.push(ChainMessage::human(user_text));

        let response = self
            .model
            .complete(&self.persona.system_prompt, &messages)
            .await?;

        let mut extended = history.to_vec();
        extended.push(DisplayTurn::new(user_text, response));
        Ok(extended)
    }
}

/// Cleared state for the clear-chat action: empty input box, empty history.
///
/// Takes nothing and depends on nothing, so repeated calls are identical.
pub fn reset() -> (String, Vec<DisplayTurn>) {
    (String::new(), Vec::new())
}
