//! Industrial response analysis domain
//!
//! Classifies queries into industrial automation domains, flags
//! safety-critical content and hallucination-prone phrasing, scores answer
//! confidence and assembles the result into an [`IndustrialResponse`].

mod classifier;
mod confidence;
mod config;
mod entity;
mod hallucination;
mod matcher;
mod pipeline;
mod prompt;
mod response;
mod rules;
mod safety;
mod sections;

pub use classifier::{DomainClassifier, DomainKeywords, WeightedKeyword};
pub use confidence::{ConfidenceAssessment, ConfidenceScorer, ConfidenceSignals};
pub use config::{AnalysisConfig, ConfidenceConfig};
pub use entity::{
    ConfidenceLevel, HallucinationFlag, IndustrialDomain, RiskLevel, SafetyWarning,
    SourceAttribution,
};
pub use hallucination::{HallucinationDetector, PatternRule};
pub use matcher::KeywordMatcher;
pub use pipeline::ResponseQualityPipeline;
pub use prompt::build_system_prompt;
pub use response::IndustrialResponse;
pub use rules::{
    HEDGE_TERMS, default_domain_keywords, default_hallucination_patterns, default_safety_rules,
};
pub use safety::{SafetyRule, SafetyScanner};
pub use sections::ResponseSections;
