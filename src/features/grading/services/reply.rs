use serde_json::{Map, Value};
use thiserror::Error;

use crate::shared::constants::MAX_SCORE;

/// Why a decoded reply object is unusable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("reply has no `score` field")]
    MissingScore,

    #[error("reply `score` is not a finite number: {0}")]
    InvalidScore(String),

    #[error("reply has no `feedback` field")]
    MissingFeedback,

    #[error("reply `feedback` is not a string")]
    InvalidFeedback,
}

/// Fields taken from a model reply after validation
#[derive(Debug, Clone, PartialEq)]
pub struct RubricReply {
    /// Always within 0..=100
    pub score: u32,
    pub feedback: String,
    pub breakdown: Map<String, Value>,
}

impl RubricReply {
    pub fn from_object(mut obj: Map<String, Value>) -> Result<Self, ReplyError> {
        let score = obj
            .get("score")
            .ok_or(ReplyError::MissingScore)
            .and_then(normalize_score)?;

        let feedback = match obj.remove("feedback") {
            Some(Value::String(text)) => text,
            Some(_) => return Err(ReplyError::InvalidFeedback),
            None => return Err(ReplyError::MissingFeedback),
        };

        let breakdown = match obj.remove("breakdown") {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => Map::new(),
            Some(other) => {
                tracing::warn!("Ignoring non-object breakdown in grading reply: {}", other);
                Map::new()
            }
        };

        Ok(Self {
            score,
            feedback,
            breakdown,
        })
    }
}

/// Integers are taken as-is and finite floats are rounded; the result is clamped to 0..=100.
fn normalize_score(value: &Value) -> Result<u32, ReplyError> {
    let Value::Number(number) = value else {
        return Err(ReplyError::InvalidScore(value.to_string()));
    };

    let max = i64::from(MAX_SCORE);
    let score = if let Some(n) = number.as_i64() {
        n.clamp(0, max)
    } else if number.as_u64().is_some() {
        // Only integers above i64::MAX land here
        max
    } else {
        match number.as_f64() {
            Some(f) if f.is_finite() => (f.round() as i64).clamp(0, max),
            _ => return Err(ReplyError::InvalidScore(number.to_string())),
        }
    };

    u32::try_from(score).map_err(|_| ReplyError::InvalidScore(number.to_string()))
}
