use async_trait::async_trait;
use thiserror::Error;

/// Failures talking to the completion API
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("completion request timed out")]
    Timeout,

    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode completion response: {0}")]
    Decode(String),

    #[error("completion response contained no text")]
    EmptyResponse,
}

/// Sends a single prompt to a hosted model and returns the generated text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, CompletionError>;
}
