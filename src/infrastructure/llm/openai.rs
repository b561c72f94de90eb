use std::fmt;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use super::transport::{CompletionBody, CompletionReply, CompletionTransport};
use crate::domain::llm::Usage;
use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponse};
use crate::infrastructure::metrics::{LlmRequestMetricParams, record_llm_request};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat-completions provider
pub struct OpenAiProvider<T: CompletionTransport> {
    transport: T,
    api_key: String,
    base_url: String,
}

impl<T: CompletionTransport> OpenAiProvider<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self::with_base_url(transport, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Any OpenAI-compatible endpoint; a trailing slash is ignored
    pub fn with_base_url(
        transport: T,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

impl<T: CompletionTransport> fmt::Debug for OpenAiProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("transport", &self.transport)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn completion_body(model: &str, request: LlmRequest) -> CompletionBody {
    CompletionBody {
        model: model.to_string(),
        messages: request.messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

/// First choice only; the crate never asks for `n > 1`
fn into_response(reply: CompletionReply) -> Result<LlmResponse, DomainError> {
    let choice = reply
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::provider("openai", "No choices in response"))?;

    let mut response = LlmResponse::new(reply.model, choice.message.content.unwrap_or_default());

    if let Some(usage) = reply.usage {
        response = response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
    }

    if choice.finish_reason.as_deref() == Some("length") {
        response = response.truncated();
    }

    Ok(response)
}

#[async_trait]
impl<T: CompletionTransport> LlmProvider for OpenAiProvider<T> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let started = Instant::now();
        let url = self.chat_completions_url();

        debug!(model = model, messages = request.messages.len(), "Sending chat completion");

        let body = completion_body(model, request);
        let result = self
            .transport
            .send(&url, &self.api_key, &body)
            .await
            .and_then(into_response);

        let usage = result.as_ref().ok().and_then(|r| r.usage);
        record_llm_request(LlmRequestMetricParams {
            provider: self.provider_name(),
            model,
            duration: started.elapsed(),
            success: result.is_ok(),
            input_tokens: usage.map(|u| u64::from(u.prompt_tokens)),
            output_tokens: usage.map(|u| u64::from(u.completion_tokens)),
        });

        result
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;
    use crate::infrastructure::llm::transport::mock::MockTransport;

    fn completion(content: &str, finish_reason: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": finish_reason
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18 }
        })
    }

    #[tokio::test]
    async fn test_openai_chat() {
        let transport =
            MockTransport::new().with_reply(completion("Check the encoder cable shielding.", "stop"));
        let provider = OpenAiProvider::new(transport, "sk-test");

        let request = LlmRequest::builder()
            .system("You are an industrial assistant")
            .user("Why does my servo drift?")
            .temperature(0.3)
            .max_tokens(1500)
            .build();

        let response = provider.chat("gpt-3.5-turbo", request).await.unwrap();

        assert_eq!(response.content(), "Check the encoder cable shielding.");
        assert_eq!(response.model, "gpt-3.5-turbo-0125");
        assert_eq!(response.usage, Some(Usage::new(10, 8)));
        assert!(!response.truncated);
    }

    #[tokio::test]
    async fn test_request_body_and_url() {
        let transport = MockTransport::new().with_reply(completion("ok", "stop"));
        let provider = OpenAiProvider::new(transport, "sk-test");

        let request = LlmRequest::builder()
            .system("sys")
            .user("hello")
            .temperature(0.5)
            .build();
        provider.chat("gpt-4o", request).await.unwrap();

        let calls = provider.transport.calls();
        let (url, body) = &calls[0];
        assert_eq!(url, "https://api.openai.com/v1/chat/completions");
        assert_eq!(body.model, "gpt-4o");
        assert_eq!(body.messages[0].role, MessageRole::System);
        assert_eq!(body.messages[1].content, "hello");
        assert_eq!(body.temperature, Some(0.5));
        assert_eq!(body.max_tokens, None);
    }

    #[tokio::test]
    async fn test_length_finish_marks_truncated() {
        let transport = MockTransport::new().with_reply(completion("Step 1: isolate the", "length"));
        let provider = OpenAiProvider::new(transport, "sk-test");

        let request = LlmRequest::builder().user("Full LOTO procedure?").build();
        let response = provider.chat("gpt-4o", request).await.unwrap();

        assert!(response.truncated);
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        let transport = MockTransport::new().with_error("connection reset");
        let provider = OpenAiProvider::new(transport, "sk-invalid");

        let request = LlmRequest::builder().user("Hello!").build();
        let err = provider.chat("gpt-4o", request).await.unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let transport = MockTransport::new()
            .with_reply(serde_json::json!({ "id": "x", "model": "gpt-4o", "choices": [] }));
        let provider = OpenAiProvider::new(transport, "sk-test");

        let request = LlmRequest::builder().user("Hello!").build();
        assert!(provider.chat("gpt-4o", request).await.is_err());
    }

    #[tokio::test]
    async fn test_openai_custom_base_url() {
        let transport = MockTransport::new().with_reply(completion("Custom response", "stop"));
        let provider = OpenAiProvider::with_base_url(transport, "sk-test", "http://localhost:8080/");

        let request = LlmRequest::builder().user("Test").build();
        let response = provider.chat("gpt-4o", request).await.unwrap();

        assert_eq!(response.content(), "Custom response");
        assert_eq!(provider.transport.calls()[0].0, "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let provider = OpenAiProvider::new(MockTransport::new(), "sk-secret");
        assert!(!format!("{:?}", provider).contains("sk-secret"));
    }
}
