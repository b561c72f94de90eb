//! Response-quality pipeline
//!
//! Runs the domain classifier, safety scanner, hallucination detector and
//! confidence scorer over a single (query, sources, answer) triple and
//! assembles an [`IndustrialResponse`]. Holds only immutable tables, so one
//! instance can be shared behind an `Arc` by any number of concurrent callers.

use tracing::debug;

use super::classifier::DomainClassifier;
use super::config::AnalysisConfig;
use super::confidence::ConfidenceScorer;
use super::entity::{IndustrialDomain, SourceAttribution};
use super::hallucination::HallucinationDetector;
use super::response::{IndustrialResponse, ResponseParts};
use super::rules::{
    HEDGE_TERMS, default_domain_keywords, default_hallucination_patterns, default_safety_rules,
};
use super::safety::SafetyScanner;
use super::sections::ResponseSections;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
pub struct ResponseQualityPipeline {
    classifier: DomainClassifier,
    safety: SafetyScanner,
    hallucination: HallucinationDetector,
    confidence: ConfidenceScorer,
}

impl ResponseQualityPipeline {
    /// Build every analyzer from the built-in tables
    pub fn new(config: &AnalysisConfig) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self::from_parts(
            DomainClassifier::new(default_domain_keywords(), config.min_domain_score)?,
            SafetyScanner::new(default_safety_rules(), config.risk_escalation_count)?,
            HallucinationDetector::new(default_hallucination_patterns())?,
            ConfidenceScorer::new(config.confidence.clone(), HEDGE_TERMS)?,
        ))
    }

    pub fn from_parts(
        classifier: DomainClassifier,
        safety: SafetyScanner,
        hallucination: HallucinationDetector,
        confidence: ConfidenceScorer,
    ) -> Self {
        Self {
            classifier,
            safety,
            hallucination,
            confidence,
        }
    }

    pub fn classifier(&self) -> &DomainClassifier {
        &self.classifier
    }

    pub fn safety(&self) -> &SafetyScanner {
        &self.safety
    }

    pub fn hallucination(&self) -> &HallucinationDetector {
        &self.hallucination
    }

    pub fn confidence(&self) -> &ConfidenceScorer {
        &self.confidence
    }

    /// Analyse a generated answer
    pub fn analyze(
        &self,
        query: &str,
        sources: Vec<SourceAttribution>,
        answer: &str,
        model_id: &str,
        latency_ms: f64,
    ) -> Result<IndustrialResponse, DomainError> {
        let domain = self.classifier.classify(query);
        self.assemble(domain, query, sources, answer, model_id, latency_ms)
    }

    /// Same as [`analyze`](Self::analyze) with a caller-chosen domain
    pub fn analyze_with_domain(
        &self,
        domain: IndustrialDomain,
        query: &str,
        sources: Vec<SourceAttribution>,
        answer: &str,
        model_id: &str,
        latency_ms: f64,
    ) -> Result<IndustrialResponse, DomainError> {
        self.assemble(domain, query, sources, answer, model_id, latency_ms)
    }

    fn assemble(
        &self,
        domain: IndustrialDomain,
        query: &str,
        sources: Vec<SourceAttribution>,
        answer: &str,
        model_id: &str,
        latency_ms: f64,
    ) -> Result<IndustrialResponse, DomainError> {
        validate_inputs(&sources, answer, model_id, latency_ms)?;

        // newline keeps multi-word terms from matching across the join
        let combined = format!("{}\n{}", query, answer);
        let safety_warnings = self.safety.scan(&combined);
        let risk_level = self.safety.assess_risk(&safety_warnings);
        let hallucination_flags = self.hallucination.detect(answer);
        let assessment = self.confidence.score(&sources, answer);

        debug!(
            domain = %domain,
            confidence = assessment.score,
            risk = %risk_level,
            warnings = safety_warnings.len(),
            flags = hallucination_flags.len(),
            "Response analysed"
        );

        Ok(IndustrialResponse::assemble(ResponseParts {
            answer: answer.to_string(),
            sections: ResponseSections::extract(answer),
            domain,
            confidence: assessment.level,
            confidence_score: assessment.score,
            risk_level,
            sources,
            safety_warnings,
            hallucination_flags,
            model_used: model_id.to_string(),
            response_time_ms: latency_ms,
        }))
    }
}

fn validate_inputs(
    sources: &[SourceAttribution],
    answer: &str,
    model_id: &str,
    latency_ms: f64,
) -> Result<(), DomainError> {
    if answer.trim().is_empty() {
        return Err(DomainError::invalid_input("answer text cannot be empty"));
    }

    if model_id.trim().is_empty() {
        return Err(DomainError::invalid_input("model identifier cannot be empty"));
    }

    if !latency_ms.is_finite() || latency_ms < 0.0 {
        return Err(DomainError::invalid_input(format!(
            "latency must be a non-negative number of milliseconds, got {}",
            latency_ms
        )));
    }

    if let Some(source) = sources
        .iter()
        .find(|s| !(0.0..=1.0).contains(&s.relevance_score))
    {
        return Err(DomainError::invalid_input(format!(
            "relevance score of '{}' must be within [0, 1], got {}",
            source.document, source.relevance_score
        )));
    }

    Ok(())
}
