//! Domain layer - Core business logic and entities

pub mod conversation;
pub mod error;
pub mod industrial;
pub mod llm;
pub mod retrieval;

pub use conversation::{
    ChatMessage, ChatRequest, Conversation, ConversationId, ConversationRepository, sanitize_input,
};
pub use error::DomainError;
pub use industrial::{
    AnalysisConfig, ConfidenceLevel, IndustrialDomain, IndustrialResponse,
    ResponseQualityPipeline, RiskLevel, SourceAttribution, build_system_prompt,
};
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use retrieval::{RetrievedChunk, Retriever, build_augmented_prompt};
