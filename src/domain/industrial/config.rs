//! Analysis configuration types

use serde::Deserialize;

use super::entity::ConfidenceLevel;
use crate::domain::DomainError;

/// Configuration shared by the response-quality analyzers
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum weighted keyword score a domain needs to be selected
    #[serde(default = "default_min_domain_score")]
    pub min_domain_score: f64,
    /// Number of safety warnings at which the aggregate risk is raised one level
    #[serde(default = "default_risk_escalation_count")]
    pub risk_escalation_count: usize,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
}

fn default_min_domain_score() -> f64 {
    1.0
}

fn default_risk_escalation_count() -> usize {
    3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_domain_score: default_min_domain_score(),
            risk_escalation_count: default_risk_escalation_count(),
            confidence: ConfidenceConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_domain_score(mut self, score: f64) -> Self {
        self.min_domain_score = score;
        self
    }

    pub fn with_risk_escalation_count(mut self, count: usize) -> Self {
        self.risk_escalation_count = count;
        self
    }

    pub fn with_confidence(mut self, confidence: ConfidenceConfig) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.min_domain_score.is_finite() || self.min_domain_score < 0.0 {
            return Err(DomainError::configuration(format!(
                "min_domain_score must be a non-negative number, got {}",
                self.min_domain_score
            )));
        }

        if self.risk_escalation_count == 0 {
            return Err(DomainError::configuration(
                "risk_escalation_count must be greater than 0",
            ));
        }

        self.confidence.validate()
    }
}

/// Weights and thresholds of the confidence heuristic
#[derive(Debug, Clone, Deserialize)]
pub struct ConfidenceConfig {
    /// Starting score before any signal is applied
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    /// Maximum bonus contributed by mean source relevance
    #[serde(default = "default_source_weight")]
    pub source_weight: f64,
    /// Subtracted when the answer was generated without retrieved sources
    #[serde(default = "default_no_source_penalty")]
    pub no_source_penalty: f64,
    /// Answers with fewer words are considered insufficiently grounded
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_short_answer_penalty")]
    pub short_answer_penalty: f64,
    #[serde(default = "default_ideal_min_words")]
    pub ideal_min_words: usize,
    #[serde(default = "default_ideal_max_words")]
    pub ideal_max_words: usize,
    #[serde(default = "default_length_bonus")]
    pub length_bonus: f64,
    /// Answers with more words are considered rambling
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default = "default_long_answer_penalty")]
    pub long_answer_penalty: f64,
    #[serde(default = "default_hedge_penalty")]
    pub hedge_penalty: f64,
    #[serde(default = "default_max_hedge_penalty")]
    pub max_hedge_penalty: f64,
    /// Scores at or above this value are at least `Medium`
    #[serde(default = "default_medium_threshold")]
    pub medium_threshold: f64,
    /// Scores at or above this value are `High`
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,
}

fn default_base_score() -> f64 {
    0.5
}

fn default_source_weight() -> f64 {
    0.3
}

fn default_no_source_penalty() -> f64 {
    0.15
}

fn default_min_words() -> usize {
    20
}

fn default_short_answer_penalty() -> f64 {
    0.2
}

fn default_ideal_min_words() -> usize {
    50
}

fn default_ideal_max_words() -> usize {
    500
}

fn default_length_bonus() -> f64 {
    0.1
}

fn default_max_words() -> usize {
    1500
}

fn default_long_answer_penalty() -> f64 {
    0.1
}

fn default_hedge_penalty() -> f64 {
    0.05
}

fn default_max_hedge_penalty() -> f64 {
    0.25
}

fn default_medium_threshold() -> f64 {
    0.4
}

fn default_high_threshold() -> f64 {
    0.75
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            source_weight: default_source_weight(),
            no_source_penalty: default_no_source_penalty(),
            min_words: default_min_words(),
            short_answer_penalty: default_short_answer_penalty(),
            ideal_min_words: default_ideal_min_words(),
            ideal_max_words: default_ideal_max_words(),
            length_bonus: default_length_bonus(),
            max_words: default_max_words(),
            long_answer_penalty: default_long_answer_penalty(),
            hedge_penalty: default_hedge_penalty(),
            max_hedge_penalty: default_max_hedge_penalty(),
            medium_threshold: default_medium_threshold(),
            high_threshold: default_high_threshold(),
        }
    }
}

impl ConfidenceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both level thresholds
    pub fn with_thresholds(mut self, medium: f64, high: f64) -> Self {
        self.medium_threshold = medium;
        self.high_threshold = high;
        self
    }

    pub fn with_source_weight(mut self, weight: f64) -> Self {
        self.source_weight = weight;
        self
    }

    pub fn with_hedge_penalty(mut self, per_hedge: f64, cap: f64) -> Self {
        self.hedge_penalty = per_hedge;
        self.max_hedge_penalty = cap;
        self
    }

    /// Map a clamped score onto a confidence level
    pub fn level_for(&self, score: f64) -> ConfidenceLevel {
        if score >= self.high_threshold {
            ConfidenceLevel::High
        } else if score >= self.medium_threshold {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [
            ("base_score", self.base_score),
            ("source_weight", self.source_weight),
            ("no_source_penalty", self.no_source_penalty),
            ("short_answer_penalty", self.short_answer_penalty),
            ("length_bonus", self.length_bonus),
            ("long_answer_penalty", self.long_answer_penalty),
            ("hedge_penalty", self.hedge_penalty),
            ("max_hedge_penalty", self.max_hedge_penalty),
        ];

        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::configuration(format!(
                    "confidence.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let thresholds_ordered = self.medium_threshold.is_finite()
            && self.high_threshold.is_finite()
            && 0.0 <= self.medium_threshold
            && self.medium_threshold < self.high_threshold
            && self.high_threshold <= 1.0;

        if !thresholds_ordered {
            return Err(DomainError::configuration(format!(
                "confidence thresholds must satisfy 0 <= medium < high <= 1, got medium={} high={}",
                self.medium_threshold, self.high_threshold
            )));
        }

        if self.ideal_min_words > self.ideal_max_words {
            return Err(DomainError::configuration(format!(
                "confidence.ideal_min_words ({}) exceeds ideal_max_words ({})",
                self.ideal_min_words, self.ideal_max_words
            )));
        }

        if self.ideal_max_words > self.max_words {
            return Err(DomainError::configuration(format!(
                "confidence.ideal_max_words ({}) exceeds max_words ({})",
                self.ideal_max_words, self.max_words
            )));
        }

        Ok(())
    }
}
