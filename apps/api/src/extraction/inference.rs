//! The inference collaborator: maps a piece of resume text to skill strings.
//!
//! The extractor only depends on the `SkillInference` trait. `AppState`
//! carries an `Arc<dyn SkillInference>`; tests plug in fakes.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::extraction::prompts::{skill_extraction_prompt, SKILL_EXTRACTION_SYSTEM};
use crate::llm_client::prompts::JSON_ARRAY_ONLY;
use crate::llm_client::{LlmClient, LlmError};

/// Why a single extraction call produced no skills.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("inference call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("malformed inference output: {0}")]
    Malformed(String),

    #[error("inference call timed out after {0:?}")]
    TimedOut(Duration),
}

#[async_trait]
pub trait SkillInference: Send + Sync {
    /// Returns the raw skill strings found in `text` (possibly empty).
    async fn extract(&self, text: &str) -> Result<Vec<String>, ExtractionError>;
}

/// `SkillInference` backed by the LLM client.
pub struct LlmSkillInference {
    llm: LlmClient,
    system_prompt: String,
}

impl LlmSkillInference {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system_prompt: format!("{SKILL_EXTRACTION_SYSTEM} {JSON_ARRAY_ONLY}"),
        }
    }
}

#[async_trait]
impl SkillInference for LlmSkillInference {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ExtractionError> {
        let prompt = skill_extraction_prompt(text);
        let value: Value = self
            .llm
            .call_json(&prompt, &self.system_prompt)
            .await
            .map_err(|e| match e {
                LlmError::Parse(parse) => ExtractionError::Malformed(parse.to_string()),
                other => ExtractionError::Llm(other),
            })?;
        parse_skill_array(value)
    }
}

/// Accepts only a JSON array whose elements are all strings.
pub fn parse_skill_array(value: Value) -> Result<Vec<String>, ExtractionError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ExtractionError::Malformed(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(ExtractionError::Malformed(format!(
                "expected string array elements, got {}",
                json_kind(&other)
            ))),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_array_is_accepted() {
        let skills = parse_skill_array(json!(["Rust", "PostgreSQL"])).unwrap();
        assert_eq!(skills, vec!["Rust", "PostgreSQL"]);
    }

    #[test]
    fn test_empty_array_is_accepted() {
        assert!(parse_skill_array(json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_object_is_malformed() {
        let err = parse_skill_array(json!({"skills": ["Rust"]})).unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(ref m) if m.contains("an object")));
    }

    #[test]
    fn test_non_string_element_is_malformed() {
        let err = parse_skill_array(json!(["Rust", 42])).unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn test_bare_string_is_malformed() {
        assert!(parse_skill_array(json!("Rust, Go")).is_err());
    }
}
