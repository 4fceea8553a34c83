//! Response parsing for model-based readiness assessment.

use serde_json::Value;

use crate::models::AiAnalysis;
use crate::utils::extract_json_str;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("No JSON found in response")]
    NoJson,
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Response scored no known category")]
    NoScores,
}

/// Parse a model response into an [`AiAnalysis`].
///
/// Individual malformed scores are coerced rather than rejected; a response
/// is only an error when it is not a JSON object or scores nothing.
pub fn parse_ai_response(response: &str) -> Result<AiAnalysis, ParseError> {
    let json_str = extract_json_str(response).ok_or(ParseError::NoJson)?;

    let value: Value =
        serde_json::from_str(json_str).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    if !value.is_object() {
        return Err(ParseError::InvalidJson("expected a JSON object".to_string()));
    }

    let analysis = AiAnalysis::from_value(&value);
    if analysis.categories.is_empty() {
        return Err(ParseError::NoScores);
    }
    Ok(analysis)
}
