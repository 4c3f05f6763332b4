//! Groq chat-completions client (OpenAI-compatible wire format).

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::client::{CompletionClient, CompletionError};
use crate::core::config::GradingConfig;

/// Maximum number of characters of an error body kept in `CompletionError::Status`
const MAX_ERROR_BODY_CHARS: usize = 500;

pub struct GroqClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    pub fn new(config: &GradingConfig) -> Result<Self, CompletionError> {
        Self::with_endpoint(
            config.base_url.clone(),
            config.api_key.clone(),
            config.model.clone(),
            config.timeout,
        )
    }

    pub fn with_endpoint(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens: max_output_tokens,
        };

        let res = self
            .client
            .post(self.endpoint())
            .header(USER_AGENT, concat!("codecraft-core/", env!("CARGO_PKG_VERSION")))
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = extract_api_error(&body).unwrap_or(body);
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: message.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body: ChatCompletionResponse = res.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::Decode(e.to_string())
            }
        })?;

        if let Some(usage) = &body.usage {
            tracing::debug!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                "Completion usage"
            );
        }

        first_message_text(body)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Transport(e.to_string())
    }
}

/// Only the first choice's message text is consumed.
fn first_message_text(body: ChatCompletionResponse) -> Result<String, CompletionError> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(CompletionError::EmptyResponse)
}

/// Pull `error.message` out of an OpenAI-style error body
fn extract_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorWrapper {
        error: ErrorObject,
    }
    #[derive(Deserialize)]
    struct ErrorObject {
        message: String,
    }

    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .map(|w| w.error.message)
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> ChatCompletionResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_first_message_text_is_trimmed() {
        let body = parse(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  {\"score\": 90}\n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
        }));

        assert_eq!(first_message_text(body).unwrap(), "{\"score\": 90}");
    }

    #[test]
    fn test_missing_choices_is_empty_response() {
        let body = parse(json!({"id": "cmpl-1"}));
        assert!(matches!(
            first_message_text(body),
            Err(CompletionError::EmptyResponse)
        ));
    }

    #[test]
    fn test_null_content_is_empty_response() {
        let body = parse(json!({"choices": [{"message": {"content": null}}]}));
        assert!(matches!(
            first_message_text(body),
            Err(CompletionError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_api_error_message() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(extract_api_error(body).as_deref(), Some("Invalid API Key"));
        assert_eq!(extract_api_error("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn test_request_serializes_openai_shape() {
        let request = ChatCompletionRequest {
            model: "llama-3.3-70b-versatile",
            messages: vec![ChatMessage {
                role: "user",
                content: "Grade this",
            }],
            temperature: 0.3,
            max_tokens: 1000,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.3-70b-versatile");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Grade this");
        assert_eq!(value["max_tokens"], 1000);
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GroqClient::with_endpoint(
            "https://api.groq.com/openai/v1/".to_string(),
            "key".to_string(),
            "model".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(client.model(), "model");
    }
}
