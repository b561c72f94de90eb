//! Confidence scoring heuristic

use serde::Serialize;

use super::config::ConfidenceConfig;
use super::entity::{ConfidenceLevel, SourceAttribution};
use super::matcher::KeywordMatcher;
use crate::domain::DomainError;

/// Breakdown of the signals that produced a confidence score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceSignals {
    /// Mean source relevance, `None` on the non-RAG path
    pub mean_relevance: Option<f64>,
    pub word_count: usize,
    pub hedge_count: usize,
    /// Weighted sum before clamping
    pub raw_score: f64,
}

/// Result of confidence scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceAssessment {
    pub level: ConfidenceLevel,
    /// Clamped to [0, 1] and rounded to three decimals
    pub score: f64,
    pub signals: ConfidenceSignals,
}

/// Combines retrieval quality, hedging language and answer length
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
    hedges: Vec<KeywordMatcher>,
}

impl ConfidenceScorer {
    pub fn new(config: ConfidenceConfig, hedge_terms: &[&str]) -> Result<Self, DomainError> {
        config.validate()?;

        if hedge_terms.is_empty() {
            return Err(DomainError::configuration("hedge term table is empty"));
        }

        let hedges = hedge_terms
            .iter()
            .map(|term| KeywordMatcher::new(*term))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { config, hedges })
    }

    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Score an answer against the sources it was generated from
    ///
    /// Relevance scores are expected in [0, 1]; callers validate them.
    pub fn score(&self, sources: &[SourceAttribution], answer: &str) -> ConfidenceAssessment {
        let cfg = &self.config;
        let mut score = cfg.base_score;

        let mean_relevance = if sources.is_empty() {
            score -= cfg.no_source_penalty;
            None
        } else {
            let mean = sources
                .iter()
                .map(|s| s.relevance_score.clamp(0.0, 1.0))
                .sum::<f64>()
                / sources.len() as f64;
            score += (mean * cfg.source_weight).min(cfg.source_weight);
            Some(mean)
        };

        let word_count = answer.split_whitespace().count();
        score += self.length_adjustment(word_count);

        let hedge_count: usize = self.hedges.iter().map(|h| h.count(answer)).sum();
        score -= (hedge_count as f64 * cfg.hedge_penalty).min(cfg.max_hedge_penalty);

        let raw_score = score;
        let score = round3(score.clamp(0.0, 1.0));

        ConfidenceAssessment {
            level: cfg.level_for(score),
            score,
            signals: ConfidenceSignals {
                mean_relevance,
                word_count,
                hedge_count,
                raw_score,
            },
        }
    }

    fn length_adjustment(&self, word_count: usize) -> f64 {
        let cfg = &self.config;

        if word_count < cfg.min_words {
            -cfg.short_answer_penalty
        } else if word_count > cfg.max_words {
            -cfg.long_answer_penalty
        } else if (cfg.ideal_min_words..=cfg.ideal_max_words).contains(&word_count) {
            cfg.length_bonus
        } else {
            0.0
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::industrial::rules::HEDGE_TERMS;

    fn scorer() -> ConfidenceScorer {
        ConfidenceScorer::new(ConfidenceConfig::default(), HEDGE_TERMS).unwrap()
    }

    fn words(n: usize) -> String {
        vec!["controller"; n].join(" ")
    }

    fn sources(scores: &[f64]) -> Vec<SourceAttribution> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| SourceAttribution::new(format!("doc{}", i + 1), *s))
            .collect()
    }

    #[test]
    fn test_high_confidence_with_sources() {
        let response =
            "This is a detailed technical explanation about PLC control loops ".repeat(5);
        let result = scorer().score(&sources(&[0.9, 0.85]), &response);

        assert!(result.score > 0.5);
        assert!(matches!(
            result.level,
            ConfidenceLevel::High | ConfidenceLevel::Medium
        ));
    }

    #[test]
    fn test_strong_sources_and_ideal_length_is_high() {
        let result = scorer().score(&sources(&[0.9]), &words(200));

        assert_eq!(result.score, 0.87);
        assert_eq!(result.level, ConfidenceLevel::High);
        assert_eq!(result.signals.mean_relevance, Some(0.9));
        assert_eq!(result.signals.word_count, 200);
        assert_eq!(result.signals.hedge_count, 0);
    }

    #[test]
    fn test_low_confidence_without_sources() {
        let result = scorer().score(&[], "Not sure about this.");
        assert!(result.score < 0.6);
        assert_eq!(result.signals.mean_relevance, None);
    }

    #[test]
    fn test_very_short_response_penalized() {
        let result = scorer().score(&[], "Yes.");
        assert!(result.score < 0.5);
        assert_eq!(result.level, ConfidenceLevel::Low);
    }

    #[test]
    fn test_excessively_long_response_penalized() {
        let ideal = scorer().score(&sources(&[0.8]), &words(300));
        let long = scorer().score(&sources(&[0.8]), &words(2000));

        assert!(long.score < ideal.score);
    }

    #[test]
    fn test_hedging_language_penalized() {
        let hedged = scorer().score(&[], "I think maybe perhaps this might possibly work.");
        let confident = scorer().score(
            &[],
            "The PID controller should be configured with Kp=2.0, Ti=5s.",
        );

        assert!(confident.score > hedged.score);
        assert_eq!(hedged.signals.hedge_count, 5);
    }

    #[test]
    fn test_hedge_penalty_is_capped() {
        let answer = format!("{} {}", "it might be".repeat(20), words(60));
        let result = scorer().score(&sources(&[1.0]), &answer);

        // 0.5 + 0.3 + 0.1 - 0.25
        assert_eq!(result.score, 0.65);
    }

    #[test]
    fn test_score_monotonic_in_mean_relevance() {
        let answer = words(120);
        let mut previous = f64::MIN;

        for step in 0..=10 {
            let relevance = step as f64 / 10.0;
            let result = scorer().score(&sources(&[relevance, relevance]), &answer);
            assert!(result.score >= previous, "score dropped at {}", relevance);
            previous = result.score;
        }
    }

    #[test]
    fn test_score_always_clamped() {
        let generous = ConfidenceConfig {
            base_score: 0.9,
            source_weight: 0.9,
            length_bonus: 0.5,
            ..ConfidenceConfig::default()
        };
        let scorer = ConfidenceScorer::new(generous, HEDGE_TERMS).unwrap();
        let result = scorer.score(&sources(&[1.0]), &words(100));

        assert_eq!(result.score, 1.0);
        assert!(result.signals.raw_score > 1.0);

        let result = self::scorer().score(&[], "x");
        assert!((0.0..=1.0).contains(&result.score));
    }

    #[test]
    fn test_level_uses_configured_thresholds() {
        let config = ConfidenceConfig::new().with_thresholds(0.9, 0.95);
        let scorer = ConfidenceScorer::new(config, HEDGE_TERMS).unwrap();
        let result = scorer.score(&sources(&[0.9]), &words(200));

        assert_eq!(result.level, ConfidenceLevel::Low);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ConfidenceConfig::new().with_thresholds(0.75, 0.4);
        let err = ConfidenceScorer::new(config, HEDGE_TERMS).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_hedge_table_rejected() {
        assert!(ConfidenceScorer::new(ConfidenceConfig::default(), &[]).is_err());
    }
}
