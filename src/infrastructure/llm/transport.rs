//! Wire format and transport for OpenAI-compatible chat completions

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Message};

const PROVIDER: &str = "openai";
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Body of `POST /v1/chat/completions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionBody {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// The parts of a completion reply this crate reads
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionReply {
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ReplyChoice>,
    pub usage: Option<ReplyUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyChoice {
    pub message: ReplyMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyMessage {
    /// `null` when the model refused or produced no text
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReplyUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Sends one completion call; swapped for a mock in tests
#[async_trait]
pub trait CompletionTransport: Send + Sync + Debug {
    async fn send(
        &self,
        url: &str,
        api_key: &str,
        body: &CompletionBody,
    ) -> Result<CompletionReply, DomainError>;
}

/// reqwest-backed transport with a whole-request timeout
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CompletionTransport for ReqwestTransport {
    async fn send(
        &self,
        url: &str,
        api_key: &str,
        body: &CompletionBody,
    ) -> Result<CompletionReply, DomainError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::provider(PROVIDER, "Completion request timed out")
                } else {
                    DomainError::provider(PROVIDER, format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(status_error(status, &detail));
        }

        response.json().await.map_err(|e| {
            DomainError::provider(PROVIDER, format!("Malformed completion reply: {}", e))
        })
    }
}

/// Auth failures are configuration problems; everything else is the provider's
fn status_error(status: StatusCode, detail: &str) -> DomainError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DomainError::configuration(format!("API key rejected ({})", status))
        }
        StatusCode::TOO_MANY_REQUESTS => DomainError::provider(PROVIDER, "Rate limited"),
        _ => {
            let detail: String = detail.chars().take(MAX_ERROR_DETAIL_CHARS).collect();
            DomainError::provider(PROVIDER, format!("HTTP {}: {}", status, detail))
        }
    }
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    pub struct MockTransport {
        reply: Option<CompletionReply>,
        error: Option<String>,
        calls: Mutex<Vec<(String, CompletionBody)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Reply with a raw chat-completions JSON document
        pub fn with_reply(mut self, json: serde_json::Value) -> Self {
            self.reply = Some(serde_json::from_value(json).unwrap());
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        /// URL and body of every call, oldest first
        pub fn calls(&self) -> Vec<(String, CompletionBody)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionTransport for MockTransport {
        async fn send(
            &self,
            url: &str,
            _api_key: &str,
            body: &CompletionBody,
        ) -> Result<CompletionReply, DomainError> {
            self.calls.lock().unwrap().push((url.to_string(), body.clone()));

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            self.reply
                .clone()
                .ok_or_else(|| DomainError::provider("mock", "No mock reply configured"))
        }
    }
}
