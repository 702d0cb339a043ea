//! Chat-completion collaborator
//!
//! The summarizer talks to an OpenAI-compatible chat endpoint through the
//! [`ChatCompletion`] trait so tests can substitute a fake without any
//! process-wide state. [`HttpChatClient`] is the production implementation:
//! a single blocking POST per file, no retries, no explicit timeout beyond
//! the client default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One summarization request, borrowed from the caller's config.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub url: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_content: &'a str,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response: expected choices[0].message.content")]
    MalformedResponse,
}

pub trait ChatCompletion {
    fn chat(&self, request: &ChatRequest<'_>) -> Result<String, ChatError>;
}

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ResponseBody {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Blocking HTTP client for chat-completion endpoints.
pub struct HttpChatClient {
    http: reqwest::blocking::Client,
}

impl HttpChatClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpChatClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatCompletion for HttpChatClient {
    fn chat(&self, request: &ChatRequest<'_>) -> Result<String, ChatError> {
        let body = RequestBody {
            model: request.model,
            messages: [
                Message {
                    role: "system",
                    content: request.system_prompt,
                },
                Message {
                    role: "user",
                    content: request.user_content,
                },
            ],
        };

        let response = self
            .http
            .post(request.url)
            .header("Authorization", format!("Bearer {}", request.api_key))
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status));
        }

        let parsed: ResponseBody = response.json().map_err(|_| ChatError::MalformedResponse)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(ChatError::MalformedResponse)?;
        Ok(choice.message.content)
    }
}
