//! Google Gemini provider
//!
//! One `generateContent` call per conversational turn. The persona's
//! instructions go in `systemInstruction`, prior turns in `contents` with
//! the roles Gemini expects (`user`/`model`), and the sampling temperature
//! in `generationConfig`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::conversation::{ChainMessage, ChainRole};

use super::{CompletionModel, ProviderError};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: SystemInstruction,
    contents: Vec<TurnContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TurnContent {
    role: &'static str,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String, temperature: f32) -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
            api_key,
            model,
            temperature,
        }
    }

    fn build_request(&self, system_prompt: &str, messages: &[ChainMessage]) -> GenerateRequest {
        let contents = messages
            .iter()
            .map(|m| TurnContent {
                role: match m.role {
                    ChainRole::Human => "user",
                    ChainRole::Ai => "model",
                },
                parts: vec![TextPart {
                    text: m.text.clone(),
                }],
            })
            .collect();

        GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![TextPart {
                    text: system_prompt.to_string(),
                }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }
}

/// Pulls the completion text out of a parsed response.
///
/// A response without candidates, or a candidate without any text part, is
/// malformed. An empty text part is a valid (empty) completion.
fn extract_text(response: GenerateResponse) -> Result<String, ProviderError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("no candidates in response".into()))?;

    let mut text: Option<String> = None;
    for part in candidate.content.parts {
        if let Some(t) = part.text {
            text.get_or_insert_with(String::new).push_str(&t);
        }
    }

    text.ok_or_else(|| ProviderError::InvalidResponse("candidate has no text parts".into()))
}

#[async_trait]
impl CompletionModel for GeminiProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChainMessage],
    ) -> Result<String, ProviderError> {
        let request = self.build_request(system_prompt, messages);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        tracing::debug!(model = %self.model, turns = messages.len(), "gemini generate_content");

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::InvalidResponse(format!(
                "{}: {}",
                status, body
            )));
        }

        let generate_response: GenerateResponse = response.json().await?;

        extract_text(generate_response)
    }
}
