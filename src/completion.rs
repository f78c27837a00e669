use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::{timeout, Duration};

use crate::config::AppConfig;

const COMPLETIONS_PATH: &str = "/chat/completions";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("completion request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("completion request timed out after {0} ms")]
    Timeout(u64),

    #[error("completion API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode completion response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("completion response contained no choices")]
    NoChoices,

    #[error("first completion choice has no message content")]
    MissingContent,
}

/// A chat-completion backend that answers a single system + user exchange.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `system_prompt` as the system message and `user_text` as the user
    /// message, returning the first choice's content unmodified.
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

fn chat_request<'a>(
    model: &'a str,
    system_prompt: &'a str,
    user_text: &'a str,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: [
            ChatMessage {
                role: "system",
                content: system_prompt,
            },
            ChatMessage {
                role: "user",
                content: user_text,
            },
        ],
    }
}

fn first_content(response: ChatResponse) -> Result<String, UpstreamError> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or(UpstreamError::NoChoices)?
        .message
        .content
        .ok_or(UpstreamError::MissingContent)
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    timeout_ms: u64,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout_ms: u64,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            timeout_ms,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.model.clone(),
            &config.base_url,
            config.timeout_ms,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, system_prompt: &str, user_text: &str) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&chat_request(&self.model, system_prompt, user_text))
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(UpstreamError::Status { status, body });
        }

        let parsed: ChatResponse = response.json().await.map_err(UpstreamError::Decode)?;
        first_content(parsed)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, UpstreamError> {
        timeout(
            Duration::from_millis(self.timeout_ms),
            self.send(system_prompt, user_text),
        )
        .await
        .map_err(|_| UpstreamError::Timeout(self.timeout_ms))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_carries_system_then_user_message() {
        let body = serde_json::to_value(chat_request("gpt-4o", "Be terse.", "Hello")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "Be terse." },
                    { "role": "user", "content": "Hello" }
                ]
            })
        );
    }

    #[test]
    fn takes_first_choice_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "  first\n" } },
                { "index": 1, "message": { "role": "assistant", "content": "second" } }
            ],
            "usage": { "total_tokens": 3 }
        }))
        .unwrap();

        assert_eq!(first_content(response).unwrap(), "  first\n");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let response: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(matches!(first_content(response), Err(UpstreamError::NoChoices)));
    }

    #[test]
    fn null_content_is_an_error() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }))
        .unwrap();
        assert!(matches!(
            first_content(response),
            Err(UpstreamError::MissingContent)
        ));
    }

    #[test]
    fn url_joins_base_without_double_slash() {
        let client = OpenAiClient::new("sk-test", "gpt-4o", "http://localhost:8080/v1/", 1_000);
        assert_eq!(client.url, "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4o");
    }
}
