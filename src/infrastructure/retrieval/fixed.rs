//! Retriever over a pre-ranked list of chunks loaded from JSON

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::{DomainError, RetrievedChunk, Retriever};

/// Serves a fixed set of chunks regardless of the query
///
/// Useful when retrieval happens upstream and only its results are handed
/// to the assistant. Not ready when the set is empty.
#[derive(Debug, Clone, Default)]
pub struct FixedSourceRetriever {
    chunks: Vec<RetrievedChunk>,
}

impl FixedSourceRetriever {
    pub fn new(mut chunks: Vec<RetrievedChunk>) -> Result<Self, DomainError> {
        if let Some(bad) = chunks
            .iter()
            .find(|c| !(0.0..=1.0).contains(&c.relevance_score))
        {
            return Err(DomainError::invalid_input(format!(
                "Chunk from '{}' has relevance {} outside [0, 1]",
                bad.source, bad.relevance_score
            )));
        }

        chunks.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        Ok(Self { chunks })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON array of chunks
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let chunks: Vec<RetrievedChunk> = serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_input(format!("Invalid sources JSON: {}", e)))?;

        Self::new(chunks)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::invalid_input(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let retriever = Self::from_json(&json)?;
        info!(path = %path.display(), chunks = retriever.len(), "Loaded source chunks");
        Ok(retriever)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl Retriever for FixedSourceRetriever {
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, DomainError> {
        let chunks: Vec<RetrievedChunk> = self.chunks.iter().take(top_k).cloned().collect();
        debug!(
            query = %query.chars().take(50).collect::<String>(),
            returned = chunks.len(),
            "Retrieved fixed chunks"
        );
        Ok(chunks)
    }

    fn is_ready(&self) -> bool {
        !self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCES: &str = r#"[
        {"content": "Scan time basics", "source": "plc.pdf", "relevance_score": 0.4},
        {"content": "PID in OB35", "source": "s7.pdf", "document_name": "S7 Manual", "relevance_score": 0.9},
        {"content": "Ladder rungs", "source": "ladder.pdf", "page": 3, "relevance_score": 0.7}
    ]"#;

    #[tokio::test]
    async fn test_returns_top_k_by_relevance() {
        let retriever = FixedSourceRetriever::from_json(SOURCES).unwrap();
        let chunks = retriever.retrieve("pid", 2).await.unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].display_name(), "S7 Manual");
        assert_eq!(chunks[1].page, Some(3));
    }

    #[tokio::test]
    async fn test_top_k_larger_than_set() {
        let retriever = FixedSourceRetriever::from_json(SOURCES).unwrap();
        assert_eq!(retriever.retrieve("pid", 10).await.unwrap().len(), 3);
    }

    #[test]
    fn test_empty_retriever_not_ready() {
        assert!(!FixedSourceRetriever::empty().is_ready());
        assert!(FixedSourceRetriever::from_json(SOURCES).unwrap().is_ready());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = FixedSourceRetriever::from_json("{not json").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_out_of_range_relevance_rejected() {
        let json = r#"[{"content": "x", "source": "a.pdf", "relevance_score": 1.5}]"#;
        assert!(FixedSourceRetriever::from_json(json).is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_invalid_input() {
        let err = FixedSourceRetriever::from_file("/nonexistent/sources.json")
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
