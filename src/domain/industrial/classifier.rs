//! Keyword-based domain classification

use tracing::debug;

use super::entity::IndustrialDomain;
use super::matcher::KeywordMatcher;
use crate::domain::DomainError;

/// A weighted keyword belonging to a domain
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedKeyword {
    pub term: String,
    pub weight: f64,
}

impl WeightedKeyword {
    pub fn new(term: impl Into<String>, weight: f64) -> Self {
        Self {
            term: term.into(),
            weight,
        }
    }
}

/// Keyword table entry for one domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainKeywords {
    pub domain: IndustrialDomain,
    pub keywords: Vec<WeightedKeyword>,
}

impl DomainKeywords {
    pub fn new(domain: IndustrialDomain, keywords: Vec<WeightedKeyword>) -> Self {
        Self { domain, keywords }
    }
}

#[derive(Debug, Clone)]
struct CompiledDomain {
    domain: IndustrialDomain,
    keywords: Vec<(KeywordMatcher, f64)>,
}

impl CompiledDomain {
    fn score(&self, text: &str) -> f64 {
        self.keywords
            .iter()
            .filter(|(matcher, _)| matcher.is_match(text))
            .map(|(_, weight)| weight)
            .sum()
    }
}

/// Maps free text onto one industrial domain via weighted keyword matching
///
/// Table order is priority order: ties go to the domain declared first.
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    domains: Vec<CompiledDomain>,
    min_score: f64,
}

impl DomainClassifier {
    pub fn new(table: Vec<DomainKeywords>, min_score: f64) -> Result<Self, DomainError> {
        if table.is_empty() {
            return Err(DomainError::configuration("domain keyword table is empty"));
        }

        let mut domains = Vec::with_capacity(table.len());

        for entry in table {
            if entry.domain.is_unknown() {
                return Err(DomainError::configuration(
                    "the fallback domain cannot carry keywords",
                ));
            }

            if entry.keywords.is_empty() {
                return Err(DomainError::configuration(format!(
                    "domain '{}' has no keywords",
                    entry.domain
                )));
            }

            let mut keywords = Vec::with_capacity(entry.keywords.len());
            for keyword in entry.keywords {
                if !keyword.weight.is_finite() || keyword.weight <= 0.0 {
                    return Err(DomainError::configuration(format!(
                        "keyword '{}' of domain '{}' has invalid weight {}",
                        keyword.term, entry.domain, keyword.weight
                    )));
                }
                keywords.push((KeywordMatcher::new(keyword.term)?, keyword.weight));
            }

            domains.push(CompiledDomain {
                domain: entry.domain,
                keywords,
            });
        }

        Ok(Self { domains, min_score })
    }

    /// Classify `text`, falling back to `IndustrialDomain::Unknown`
    pub fn classify(&self, text: &str) -> IndustrialDomain {
        if text.trim().is_empty() {
            return IndustrialDomain::Unknown;
        }

        let mut best: Option<(IndustrialDomain, f64)> = None;

        for compiled in &self.domains {
            let score = compiled.score(text);
            // strict comparison keeps the earlier domain on ties
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((compiled.domain, score));
            }
        }

        match best {
            Some((domain, score)) if score > 0.0 && score >= self.min_score => {
                debug!(domain = %domain, score, "Classified query domain");
                domain
            }
            _ => IndustrialDomain::Unknown,
        }
    }

    /// Score of every domain in table order
    pub fn scores(&self, text: &str) -> Vec<(IndustrialDomain, f64)> {
        self.domains
            .iter()
            .map(|compiled| (compiled.domain, compiled.score(text)))
            .collect()
    }
}
