use crate::error::{GenerationError, Result};
use serde::Serialize;
use std::fmt;

/// User-supplied image description, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(GenerationError::Validation);
        }
        Ok(Prompt(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON body posted to the webhook: `{"promptText": "..."}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest<'a> {
    pub prompt_text: &'a str,
}

impl<'a> From<&'a Prompt> for GenerationRequest<'a> {
    fn from(prompt: &'a Prompt) -> Self {
        GenerationRequest {
            prompt_text: prompt.as_str(),
        }
    }
}
