//! Incoming chat requests and input sanitisation

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ConversationId;
use crate::domain::DomainError;
use crate::domain::industrial::IndustrialDomain;

/// Phrases commonly used to override the system prompt
static INJECTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(ignore previous|disregard|forget all)").unwrap());

const FILTERED: &str = "[FILTERED]";

fn default_use_rag() -> bool {
    true
}

/// A user message submitted to the chat service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default = "default_use_rag")]
    pub use_rag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_hint: Option<IndustrialDomain>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conversation_id: None,
            temperature: None,
            use_rag: default_use_rag(),
            domain_hint: None,
        }
    }

    pub fn with_conversation(mut self, id: ConversationId) -> Self {
        self.conversation_id = Some(id);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_rag(mut self, use_rag: bool) -> Self {
        self.use_rag = use_rag;
        self
    }

    pub fn with_domain_hint(mut self, domain: IndustrialDomain) -> Self {
        self.domain_hint = Some(domain);
        self
    }

    pub fn validate(&self, max_message_length: usize) -> Result<(), DomainError> {
        if self.message.trim().is_empty() {
            return Err(DomainError::invalid_input("Message cannot be empty"));
        }

        let length = self.message.chars().count();
        if length > max_message_length {
            return Err(DomainError::invalid_input(format!(
                "Message is {} characters, maximum is {}",
                length, max_message_length
            )));
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(DomainError::invalid_input(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temperature
                )));
            }
        }

        Ok(())
    }
}

/// Trim, cap at `max_length` characters and neutralise prompt-injection phrases
pub fn sanitize_input(text: &str, max_length: usize) -> String {
    let trimmed = text.trim();
    let capped = match trimmed.char_indices().nth(max_length) {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    };

    INJECTION_PATTERN.replace_all(capped, FILTERED).into_owned()
}
