//! Industrial AI Knowledge Assistant
//!
//! Domain-aware analysis of LLM answers for industrial automation questions:
//! - Keyword-based domain classification (PLC, SCADA, building automation, ...)
//! - Safety warnings tied to industry standards and an aggregate risk level
//! - Hallucination red-flag detection and confidence scoring
//! - Chat orchestration with optional retrieved context

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{DomainError, IndustrialResponse, ResponseQualityPipeline};
pub use infrastructure::chat::{ChatResponse, ChatService};
