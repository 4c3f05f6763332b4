use serde_json::{Map, Value};
use thiserror::Error;

/// Why a model reply could not be turned into a JSON object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no JSON object found in response")]
    NoObject,

    #[error("invalid JSON object in response: {0}")]
    InvalidJson(String),
}

/// Extract the JSON object embedded in free-form model output.
///
/// Models are told to answer with a bare object but often wrap it in prose or
/// markdown fences. The span from the first `{` to the last `}` is taken as the
/// object and decoded in a single pass; no repair is attempted.
///
/// ```ignore
/// let obj = extract_json_object("Sure! {\"score\": 82}")?;
/// assert_eq!(obj["score"], 82);
/// ```
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, ParseError> {
    let start = text.find('{').ok_or(ParseError::NoObject)?;
    let end = text.rfind('}').ok_or(ParseError::NoObject)?;

    if end < start {
        return Err(ParseError::NoObject);
    }

    let span = &text[start..=end];

    serde_json::from_str::<Map<String, Value>>(span).map_err(|e| {
        tracing::debug!(
            "Rejected JSON span (first 200 chars): {}",
            span.chars().take(200).collect::<String>()
        );
        ParseError::InvalidJson(e.to_string())
    })
}
