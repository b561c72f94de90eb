//! Conversation domain

mod entity;
mod repository;
mod request;

pub use entity::{ChatMessage, Conversation, ConversationId};
pub use repository::ConversationRepository;
pub use request::{ChatRequest, sanitize_input};
