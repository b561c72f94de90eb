//! In-memory conversation repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::error::DomainError;
use crate::domain::{Conversation, ConversationId, ConversationRepository};

/// In-memory implementation of ConversationRepository
#[derive(Debug, Clone)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            conversations: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConversationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        let conversations = self.conversations.read().await;
        Ok(conversations.get(id).cloned())
    }

    async fn save(&self, conversation: Conversation) -> Result<(), DomainError> {
        let mut conversations = self.conversations.write().await;
        conversations.insert(conversation.id(), conversation);
        Ok(())
    }

    async fn delete(&self, id: &ConversationId) -> Result<bool, DomainError> {
        let mut conversations = self.conversations.write().await;
        Ok(conversations.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.conversations.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = InMemoryConversationRepository::new();
        let mut conversation = Conversation::new();
        conversation.add_message(MessageRole::User, "What is BACnet?");
        let id = conversation.id();

        repo.save(conversation).await.unwrap();

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let repo = InMemoryConversationRepository::new();
        let mut conversation = Conversation::new();
        let id = conversation.id();

        repo.save(conversation.clone()).await.unwrap();
        conversation.add_message(MessageRole::User, "follow-up");
        repo.save(conversation).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.get(&id).await.unwrap().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryConversationRepository::new();
        let conversation = Conversation::new();
        let id = conversation.id();
        repo.save(conversation).await.unwrap();

        assert!(repo.delete(&id).await.unwrap());
        assert!(!repo.delete(&id).await.unwrap());
        assert!(repo.get(&id).await.unwrap().is_none());
    }
}
