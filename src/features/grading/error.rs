use thiserror::Error;

use crate::core::error::AppError;

/// Caller-visible grading failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// The submission lacks the text its challenge category requires
    #[error("{0}")]
    MissingField(&'static str),
}

impl From<GradingError> for AppError {
    fn from(e: GradingError) -> Self {
        AppError::Validation(e.to_string())
    }
}
