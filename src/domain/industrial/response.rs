//! The aggregate analysis result

use serde::Serialize;

use super::entity::{
    ConfidenceLevel, HallucinationFlag, IndustrialDomain, RiskLevel, SafetyWarning,
    SourceAttribution,
};
use super::sections::ResponseSections;

/// Structured, analysed answer to an industrial query
///
/// Built once by the response-quality pipeline; exposes read-only accessors.
/// Serialize-only, so it cannot be constructed from outside input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustrialResponse {
    answer: String,
    #[serde(flatten)]
    sections: ResponseSections,
    domain: IndustrialDomain,
    confidence: ConfidenceLevel,
    confidence_score: f64,
    risk_level: RiskLevel,
    sources: Vec<SourceAttribution>,
    safety_warnings: Vec<SafetyWarning>,
    hallucination_flags: Vec<HallucinationFlag>,
    model_used: String,
    response_time_ms: f64,
}

/// Parts assembled by the pipeline
pub(super) struct ResponseParts {
    pub answer: String,
    pub sections: ResponseSections,
    pub domain: IndustrialDomain,
    pub confidence: ConfidenceLevel,
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
    pub sources: Vec<SourceAttribution>,
    pub safety_warnings: Vec<SafetyWarning>,
    pub hallucination_flags: Vec<HallucinationFlag>,
    pub model_used: String,
    pub response_time_ms: f64,
}

impl IndustrialResponse {
    pub(super) fn assemble(parts: ResponseParts) -> Self {
        Self {
            answer: parts.answer,
            sections: parts.sections,
            domain: parts.domain,
            confidence: parts.confidence,
            confidence_score: parts.confidence_score,
            risk_level: parts.risk_level,
            sources: parts.sources,
            safety_warnings: parts.safety_warnings,
            hallucination_flags: parts.hallucination_flags,
            model_used: parts.model_used,
            response_time_ms: parts.response_time_ms,
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn sections(&self) -> &ResponseSections {
        &self.sections
    }

    pub fn domain(&self) -> IndustrialDomain {
        self.domain
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    pub fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    pub fn sources(&self) -> &[SourceAttribution] {
        &self.sources
    }

    pub fn safety_warnings(&self) -> &[SafetyWarning] {
        &self.safety_warnings
    }

    pub fn hallucination_flags(&self) -> &[HallucinationFlag] {
        &self.hallucination_flags
    }

    pub fn model_used(&self) -> &str {
        &self.model_used
    }

    pub fn response_time_ms(&self) -> f64 {
        self.response_time_ms
    }

    pub fn has_safety_concerns(&self) -> bool {
        !self.safety_warnings.is_empty()
    }

    pub fn is_high_confidence(&self) -> bool {
        self.confidence == ConfidenceLevel::High
    }
}
