//! Safety keyword scanning and risk assessment

use super::entity::{RiskLevel, SafetyWarning};
use super::matcher::KeywordMatcher;
use crate::domain::DomainError;

/// A safety-critical topic and the standard it falls under
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyRule {
    /// Trigger terms; the first one found names the warning
    pub terms: Vec<String>,
    pub severity: RiskLevel,
    pub standard_reference: String,
    pub message: String,
}

impl SafetyRule {
    pub fn new(
        terms: &[&str],
        severity: RiskLevel,
        standard_reference: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            severity,
            standard_reference: standard_reference.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    matchers: Vec<KeywordMatcher>,
    severity: RiskLevel,
    standard_reference: String,
    message: String,
}

/// Detects safety-critical terms and emits standard-referenced warnings
#[derive(Debug, Clone)]
pub struct SafetyScanner {
    rules: Vec<CompiledRule>,
    escalation_count: usize,
}

impl SafetyScanner {
    pub fn new(rules: Vec<SafetyRule>, escalation_count: usize) -> Result<Self, DomainError> {
        if rules.is_empty() {
            return Err(DomainError::configuration("safety rule table is empty"));
        }

        if escalation_count == 0 {
            return Err(DomainError::configuration(
                "risk escalation count must be greater than 0",
            ));
        }

        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.terms.is_empty() {
                return Err(DomainError::configuration(format!(
                    "safety rule '{}' has no trigger terms",
                    rule.message
                )));
            }

            if rule.standard_reference.trim().is_empty() {
                return Err(DomainError::configuration(format!(
                    "safety rule '{}' has no standard reference",
                    rule.message
                )));
            }

            let matchers = rule
                .terms
                .into_iter()
                .map(KeywordMatcher::new)
                .collect::<Result<Vec<_>, _>>()?;

            compiled.push(CompiledRule {
                matchers,
                severity: rule.severity,
                standard_reference: rule.standard_reference,
                message: rule.message,
            });
        }

        Ok(Self {
            rules: compiled,
            escalation_count,
        })
    }

    /// Warnings for every rule triggered by `text`, at most one per rule, in rule order
    pub fn scan(&self, text: &str) -> Vec<SafetyWarning> {
        self.rules
            .iter()
            .filter_map(|rule| {
                rule.matchers
                    .iter()
                    .find(|m| m.is_match(text))
                    .map(|matcher| SafetyWarning {
                        standard_reference: rule.standard_reference.clone(),
                        keyword: matcher.term().to_string(),
                        severity: rule.severity,
                        message: rule.message.clone(),
                    })
            })
            .collect()
    }

    /// Aggregate risk: the highest severity, one level higher once the
    /// escalation count is reached
    pub fn assess_risk(&self, warnings: &[SafetyWarning]) -> RiskLevel {
        let highest = warnings
            .iter()
            .map(|w| w.severity)
            .max()
            .unwrap_or(RiskLevel::Low);

        if warnings.len() >= self.escalation_count {
            highest.escalate()
        } else {
            highest
        }
    }
}
