use serde::{Deserialize, Serialize};

use crate::domain::industrial::SourceAttribution;

const SECTION_PREVIEW_CHARS: usize = 100;
const EXCERPT_CHARS: usize = 200;

/// A document chunk returned by a retriever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk text
    pub content: String,
    /// Path or URI the chunk was loaded from
    pub source: String,
    /// Display name of the document, preferred over `source` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default)]
    pub chunk_index: usize,
    /// Similarity in [0, 1], higher is more relevant
    pub relevance_score: f64,
}

impl RetrievedChunk {
    pub fn new(content: impl Into<String>, source: impl Into<String>, relevance_score: f64) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            document_name: None,
            page: None,
            chunk_index: 0,
            relevance_score,
        }
    }

    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_chunk_index(mut self, index: usize) -> Self {
        self.chunk_index = index;
        self
    }

    pub fn display_name(&self) -> &str {
        self.document_name.as_deref().unwrap_or(&self.source)
    }

    /// Attribution shown to the user for this chunk
    pub fn to_attribution(&self) -> SourceAttribution {
        let section = if self.content.chars().count() > SECTION_PREVIEW_CHARS {
            format!("{}...", take_chars(&self.content, SECTION_PREVIEW_CHARS))
        } else {
            self.content.clone()
        };

        SourceAttribution::new(self.display_name(), self.relevance_score)
            .with_section(section)
            .with_excerpt(take_chars(&self.content, EXCERPT_CHARS))
    }
}

fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
