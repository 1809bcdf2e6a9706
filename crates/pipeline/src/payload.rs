//! Inbound request payload and shape validation.
//!
//! The payload has two fields:
//! - `subjects`: list of subject name strings
//! - `interests`: mapping from stringified question ids to string responses
//!
//! Only structural faults are rejected. Unknown subject names and
//! unparseable or out-of-range question ids are tolerated and fall through
//! to the encoder's default/ignore rules.

use crate::error::PipelineError;
use catalog::QuestionId;
use serde_json::Value;
use std::collections::HashMap;

/// A student's answers: selected subjects plus survey responses.
#[derive(Debug, Clone, Default)]
pub struct RecommendRequest {
    /// Subject names as sent by the client, not yet normalized
    pub subjects: Vec<String>,
    /// Interest responses keyed by question identifier
    pub interests: HashMap<QuestionId, String>,
}

impl RecommendRequest {
    /// Validate and extract a request from a JSON payload.
    ///
    /// # Errors
    /// `Validation` if the payload is not an object, a field is missing,
    /// `subjects` is not a list of strings, or `interests` is not a
    /// mapping of strings to strings.
    pub fn from_value(payload: &Value) -> Result<Self, PipelineError> {
        let object = payload.as_object().ok_or_else(|| {
            PipelineError::Validation("request body must be a JSON object".to_string())
        })?;

        let subjects = object
            .get("subjects")
            .ok_or_else(|| PipelineError::Validation("missing `subjects` field".to_string()))?
            .as_array()
            .ok_or_else(|| {
                PipelineError::Validation("`subjects` must be a list of strings".to_string())
            })?
            .iter()
            .map(|entry| {
                entry.as_str().map(str::to_string).ok_or_else(|| {
                    PipelineError::Validation("`subjects` must be a list of strings".to_string())
                })
            })
            .collect::<Result<Vec<String>, PipelineError>>()?;

        let interest_entries = object
            .get("interests")
            .ok_or_else(|| PipelineError::Validation("missing `interests` field".to_string()))?
            .as_object()
            .ok_or_else(|| {
                PipelineError::Validation(
                    "`interests` must be a mapping from question ids to responses".to_string(),
                )
            })?;

        let mut interests = HashMap::new();
        for (key, value) in interest_entries {
            let response = value.as_str().ok_or_else(|| {
                PipelineError::Validation(format!(
                    "interest response for question {} must be a string",
                    key
                ))
            })?;
            // Non-numeric identifiers are dropped, not rejected
            if let Ok(id) = key.parse::<QuestionId>() {
                interests.insert(id, response.to_string());
            }
        }

        Ok(Self {
            subjects,
            interests,
        })
    }

    /// Parse a request from raw JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let payload: Value = serde_json::from_str(json)
            .map_err(|e| PipelineError::Validation(format!("invalid JSON payload: {}", e)))?;
        Self::from_value(&payload)
    }
}
