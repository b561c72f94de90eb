//! Case-insensitive keyword matching

use regex::{Regex, RegexBuilder};

use crate::domain::DomainError;

/// A compiled keyword or phrase
///
/// Word boundaries are only enforced on edges whose character is
/// alphanumeric, so `sil` will not match inside `silicon` while terms such as
/// `isa-18.2` or `i/o module` still match as written.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    term: String,
    regex: Regex,
}

impl KeywordMatcher {
    pub fn new(term: impl Into<String>) -> Result<Self, DomainError> {
        let term = term.into().trim().to_lowercase();

        let (first, last) = match (term.chars().next(), term.chars().last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(DomainError::configuration("keyword term cannot be empty")),
        };

        let mut pattern = String::with_capacity(term.len() + 8);
        if first.is_alphanumeric() {
            pattern.push_str(r"\b");
        }
        pattern.push_str(&regex::escape(&term));
        if last.is_alphanumeric() {
            pattern.push_str(r"\b");
        }

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("invalid keyword '{}': {}", term, e))
            })?;

        Ok(Self { term, regex })
    }

    /// The normalized (trimmed, lowercase) term
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Number of non-overlapping occurrences in `text`
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}
