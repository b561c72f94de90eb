use async_trait::async_trait;
use std::fmt::Debug;

use super::RetrievedChunk;
use crate::domain::DomainError;

/// Source of context chunks for retrieval-augmented answers
#[async_trait]
pub trait Retriever: Send + Sync + Debug {
    /// Return at most `top_k` chunks, most relevant first
    async fn retrieve(&self, query: &str, top_k: usize)
    -> Result<Vec<RetrievedChunk>, DomainError>;

    /// Whether the retriever has an index to search
    fn is_ready(&self) -> bool;
}
