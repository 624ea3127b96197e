//! JSON extraction from model output
//!
//! Models often wrap the JSON payload in prose or code fences, so the
//! outermost `{...}` span is taken before deserializing.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

use super::types::{SuggestionList, SUGGESTION_COUNT};

const RAW_PREVIEW_CHARS: usize = 200;

/// Deserialize the first `{` through the last `}` of a response
pub fn parse_json_object<T: DeserializeOwned>(response: &str) -> Result<T> {
    let response = response.trim();

    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            let json = &response[start..=end];
            serde_json::from_str(json).map_err(|e| {
                Error::InvalidData(format!("Invalid JSON from AI: {} | Raw: {}", e, preview(json)))
            })
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            preview(response)
        ))),
    }
}

/// Parse a suggestion list, dropping blank entries and keeping at most three
pub fn parse_suggestions(response: &str) -> Result<Vec<String>> {
    let list: SuggestionList = parse_json_object(response)?;

    Ok(list
        .suggestions
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(SUGGESTION_COUNT)
        .collect())
}

fn preview(text: &str) -> String {
    if text.chars().count() > RAW_PREVIEW_CHARS {
        format!("{}...", text.chars().take(RAW_PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}
