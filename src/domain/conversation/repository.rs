//! Conversation repository trait

use async_trait::async_trait;

use super::{Conversation, ConversationId};
use crate::domain::DomainError;

/// Repository trait for conversation persistence
#[async_trait]
pub trait ConversationRepository: Send + Sync + std::fmt::Debug {
    /// Get a conversation by ID
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError>;

    /// Insert or replace a conversation
    async fn save(&self, conversation: Conversation) -> Result<(), DomainError>;

    /// Delete a conversation, returning whether it existed
    async fn delete(&self, id: &ConversationId) -> Result<bool, DomainError>;

    /// Number of stored conversations
    async fn count(&self) -> Result<usize, DomainError>;
}
