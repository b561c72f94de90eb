//! Infrastructure layer - External service implementations

pub mod chat;
pub mod conversation;
pub mod llm;
pub mod logging;
pub mod metrics;
pub mod retrieval;
