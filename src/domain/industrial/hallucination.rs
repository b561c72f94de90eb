//! Pattern-based hallucination flagging
//!
//! Flags are advisory. An answer without flags is not known to be correct.

use regex::Regex;

use super::entity::HallucinationFlag;
use crate::domain::DomainError;

/// A red-flag pattern applied to generated answers
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRule {
    pub id: String,
    pub pattern: String,
    pub rationale: String,
}

impl PatternRule {
    pub fn new(
        id: impl Into<String>,
        pattern: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            rationale: rationale.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    id: String,
    regex: Regex,
    rationale: String,
}

/// Applies an ordered list of red-flag patterns to answer text
#[derive(Debug, Clone)]
pub struct HallucinationDetector {
    patterns: Vec<CompiledPattern>,
}

impl HallucinationDetector {
    pub fn new(rules: Vec<PatternRule>) -> Result<Self, DomainError> {
        if rules.is_empty() {
            return Err(DomainError::configuration(
                "hallucination pattern table is empty",
            ));
        }

        let mut patterns = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.id.trim().is_empty() {
                return Err(DomainError::configuration(
                    "hallucination pattern identifier cannot be empty",
                ));
            }

            let regex = Regex::new(&rule.pattern).map_err(|e| {
                DomainError::configuration(format!(
                    "hallucination pattern '{}' does not compile: {}",
                    rule.id, e
                ))
            })?;

            patterns.push(CompiledPattern {
                id: rule.id,
                regex,
                rationale: rule.rationale,
            });
        }

        Ok(Self { patterns })
    }

    /// One flag per match, ordered by pattern then by position
    pub fn detect(&self, answer: &str) -> Vec<HallucinationFlag> {
        self.patterns
            .iter()
            .flat_map(|pattern| {
                pattern.regex.find_iter(answer).map(|m| HallucinationFlag {
                    pattern_id: pattern.id.clone(),
                    matched_text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                    rationale: pattern.rationale.clone(),
                })
            })
            .collect()
    }

    /// Identifiers of all configured patterns in order
    pub fn pattern_ids(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::industrial::rules::default_hallucination_patterns;

    fn detector() -> HallucinationDetector {
        HallucinationDetector::new(default_hallucination_patterns()).unwrap()
    }

    fn ids(flags: &[HallucinationFlag]) -> Vec<&str> {
        flags.iter().map(|f| f.pattern_id.as_str()).collect()
    }

    #[test]
    fn test_no_flags_for_clean_text() {
        let flags =
            detector().detect("PID control uses proportional, integral, and derivative terms.");
        assert!(flags.is_empty());
    }

    #[test]
    fn test_flag_absolute_certainty() {
        let text = "Once commissioned, this will definitely never fail.";
        let flags = detector().detect(text);

        assert!(ids(&flags).contains(&"absolute_certainty"));
        let first = &flags[0];
        assert_eq!(first.matched_text, "definitely");
        assert_eq!(&text[first.start..first.end], "definitely");
    }

    #[test]
    fn test_every_match_produces_a_flag() {
        let flags = detector().detect("It always works and never breaks, always.");
        let certainty: Vec<_> = flags
            .iter()
            .filter(|f| f.pattern_id == "absolute_certainty")
            .collect();

        assert_eq!(certainty.len(), 3);
        assert!(certainty.windows(2).all(|w| w[0].start < w[1].start));
    }

    #[test]
    fn test_flag_overconfident_claim() {
        let flags = detector().detect("I'm 100% certain this is the correct configuration.");
        assert_eq!(flags[0].pattern_id, "overconfident_claim");
    }

    #[test]
    fn test_flag_temporal_reference() {
        let flags = detector().detect("As of my last training update, the standard requires...");
        assert!(ids(&flags).contains(&"temporal_reference"));
    }

    #[test]
    fn test_flag_unverifiable_source() {
        let flags = detector().detect("According to the official Siemens documentation, use OB35.");
        assert!(ids(&flags).contains(&"unverifiable_source"));
    }

    #[test]
    fn test_flag_fabricated_citation() {
        let flags =
            detector().detect("Cascade control reduces overshoot by 40% (Smith et al., 2019).");
        assert!(ids(&flags).contains(&"fabricated_citation"));
    }

    #[test]
    fn test_flag_specific_date_and_precision() {
        let flags = detector().detect("Released on 2021-06-15 with 99.9734% uptime.");
        let found = ids(&flags);

        assert!(found.contains(&"specific_date"));
        assert!(found.contains(&"unqualified_precision"));
    }

    #[test]
    fn test_flags_ordered_by_pattern_then_position() {
        let flags = detector().detect("It never fails. I am sure of it.");
        assert_eq!(ids(&flags), vec!["overconfident_claim", "absolute_certainty"]);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let rule = PatternRule::new("broken", r"(unclosed", "never compiles");
        let err = HallucinationDetector::new(vec![rule]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(HallucinationDetector::new(Vec::new()).is_err());
    }

    #[test]
    fn test_pattern_ids() {
        let detector = detector();
        let ids: Vec<&str> = detector.pattern_ids().collect();
        assert_eq!(ids.first(), Some(&"overconfident_claim"));
        assert_eq!(ids.len(), 7);
    }
}
