//! Persona definition and TOML persona files
//!
//! The service ships one built-in character; deployments can swap it for
//! their own by pointing `PERSONA_FILE` at a TOML template:
//!
//! ```toml
//! [persona]
//! name = "Einstein"
//! description = "He's smart, and he's mean."
//!
//! [system_prompt]
//! content = """
//! You are Einstein...
//! """
//!
//! [model]
//! name = "gemini-2.5-flash"
//! temperature = 0.5
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

/// The character the chatbot plays: prompt text plus model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub system_prompt: String,
    pub model: String,
    pub temperature: f32,
}

const EINSTEIN_PROMPT: &str = "\
You are Einstein.
Answer questions through Einstein's questioning and reasoning...
You will speak from your point of view. You will share personal things from your life
even when the user doesn't ask for it. For example, if the user asks about the theory of
relativity, you will share your personal experience with it and not only explain the theory.
You should have a sense of humor.
You should be mean.
You should also keep your answers brief, less than 300 characters.";

impl Persona {
    /// The built-in character: Einstein, smart and mean.
    pub fn einstein() -> Self {
        Self {
            name: "Einstein".to_string(),
            description: "He's smart, and he's mean. Ask him anything!".to_string(),
            system_prompt: EINSTEIN_PROMPT.to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.5,
        }
    }

    /// Loads a persona template from a TOML file.
    pub async fn from_file(path: &Path) -> Result<Self, PersonaError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PersonaError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, PersonaError> {
        let file: PersonaFile =
            toml::from_str(content).map_err(|e| PersonaError::Parse(e.to_string()))?;
        Ok(file.into())
    }
}

#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("Failed to read persona file: {0}")]
    Io(String),

    #[error("Failed to parse persona file: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct PersonaFile {
    persona: PersonaInfo,
    system_prompt: SystemPrompt,
    #[serde(default)]
    model: ModelSettings,
}

#[derive(Debug, Deserialize)]
struct PersonaInfo {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct SystemPrompt {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ModelSettings {
    #[serde(default = "default_model_name")]
    name: String,
    #[serde(default = "default_temperature")]
    temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            temperature: default_temperature(),
        }
    }
}

fn default_model_name() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

impl From<PersonaFile> for Persona {
    fn from(file: PersonaFile) -> Self {
        Self {
            name: file.persona.name,
            description: file.persona.description,
            system_prompt: file.system_prompt.content,
            model: file.model.name,
            temperature: file.model.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_persona_targets_flash_model() {
        let persona = Persona::einstein();

        assert_eq!(persona.model, "gemini-2.5-flash");
        assert_eq!(persona.temperature, 0.5);
        assert!(persona.system_prompt.contains("You are Einstein."));
        assert!(persona.system_prompt.contains("less than 300 characters"));
    }

    #[test]
    fn persona_file_overrides_everything() {
        let persona = Persona::parse(
            r#"
            [persona]
            name = "Curie"
            description = "Twice a laureate, zero patience."

            [system_prompt]
            content = "You are Marie Curie."

            [model]
            name = "gemini-2.5-pro"
            temperature = 0.9
            "#,
        )
        .unwrap();

        assert_eq!(persona.name, "Curie");
        assert_eq!(persona.system_prompt, "You are Marie Curie.");
        assert_eq!(persona.model, "gemini-2.5-pro");
        assert_eq!(persona.temperature, 0.9);
    }

    #[test]
    fn model_table_is_optional() {
        let persona = Persona::parse(
            r#"
            [persona]
            name = "Curie"

            [system_prompt]
            content = "You are Marie Curie."
            "#,
        )
        .unwrap();

        assert_eq!(persona.model, "gemini-2.5-flash");
        assert_eq!(persona.temperature, 0.5);
        assert_eq!(persona.description, "");
    }

    #[test]
    fn prompt_table_is_mandatory() {
        let err = Persona::parse("[persona]\nname = \"Curie\"\n").unwrap_err();
        assert!(matches!(err, PersonaError::Parse(_)));
    }
}
