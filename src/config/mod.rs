//! Application configuration

mod app_config;

pub use app_config::{AppConfig, ChatConfig, LlmConfig, LogFormat, LoggingConfig};
