use serde::Deserialize;

use crate::domain::{AnalysisConfig, DomainError};
use crate::infrastructure::chat::ChatServiceConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// OpenAI-compatible endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_retrieval_top_k")]
    pub retrieval_top_k: usize,
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_history_limit() -> usize {
    10
}

fn default_retrieval_top_k() -> usize {
    4
}

fn default_max_message_length() -> usize {
    5000
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            retrieval_top_k: default_retrieval_top_k(),
            max_message_length: default_max_message_length(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(ref key) = self.llm.api_key {
            if !key.starts_with("sk-") {
                return Err(DomainError::configuration(
                    "llm.api_key must start with 'sk-'",
                ));
            }
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DomainError::configuration(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if !(100..=8000).contains(&self.llm.max_tokens) {
            return Err(DomainError::configuration(format!(
                "llm.max_tokens must be between 100 and 8000, got {}",
                self.llm.max_tokens
            )));
        }

        if !(1..=20).contains(&self.chat.retrieval_top_k) {
            return Err(DomainError::configuration(format!(
                "chat.retrieval_top_k must be between 1 and 20, got {}",
                self.chat.retrieval_top_k
            )));
        }

        if self.chat.history_limit == 0 {
            return Err(DomainError::configuration(
                "chat.history_limit must be greater than 0",
            ));
        }

        if self.chat.max_message_length == 0 {
            return Err(DomainError::configuration(
                "chat.max_message_length must be greater than 0",
            ));
        }

        self.analysis.validate()
    }

    pub fn chat_service_config(&self) -> ChatServiceConfig {
        ChatServiceConfig {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
            history_limit: self.chat.history_limit,
            retrieval_top_k: self.chat.retrieval_top_k,
            max_message_length: self.chat.max_message_length,
        }
    }
}
