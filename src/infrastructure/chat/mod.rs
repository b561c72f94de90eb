//! Chat orchestration

mod service;

pub use service::{ChatResponse, ChatService, ChatServiceConfig, FALLBACK_ANSWER};
