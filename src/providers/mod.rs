//! Completion backends
//!
//! The chat chain talks to the model through the [`CompletionModel`] trait
//! so tests can substitute a fake for the hosted API.

pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::conversation::ChainMessage;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A backend that turns one assembled prompt into one completion string.
///
/// `messages` is the chain-shape conversation with the newest human message
/// last; the persona's instructions travel separately as `system_prompt`.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChainMessage],
    ) -> Result<String, ProviderError>;
}
