//! Extraction of Problem / Root Cause / Solution sections from answers

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches a section heading line such as `## Root Cause`, `**Problem:** ...`
/// or `3. Solution:`. Group 1 is the heading name, group 2 the inline text.
static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:#{1,6}\s*)?(?:\d+[.)]\s*)?(?:\*\*|__)?\s*(problem(?:\s+summary|\s+statement)?|root\s+cause(?:\s+analysis)?|(?:recommended\s+)?solution|risk(?:\s+assessment)?|safety(?:\s+considerations)?)\s*(?:\*\*|__)?\s*(?::\s*(?:\*\*|__)?\s*(.*)|$)",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Problem,
    RootCause,
    Solution,
    Other,
}

impl SectionKind {
    fn from_heading(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.starts_with("problem") {
            Self::Problem
        } else if name.starts_with("root") {
            Self::RootCause
        } else if name.contains("solution") {
            Self::Solution
        } else {
            Self::Other
        }
    }
}

/// Structured troubleshooting sections found in an answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl ResponseSections {
    /// Collect the text under each recognised heading up to the next heading.
    /// Only the first occurrence of a heading is kept.
    pub fn extract(answer: &str) -> Self {
        let mut sections = Self::default();
        let mut current: Option<SectionKind> = None;
        let mut buffer: Vec<&str> = Vec::new();

        for line in answer.lines() {
            if let Some(caps) = HEADING_PATTERN.captures(line) {
                sections.store(current, &buffer);
                buffer.clear();

                current = caps.get(1).map(|m| SectionKind::from_heading(m.as_str()));
                if let Some(inline) = caps.get(2) {
                    buffer.push(inline.as_str());
                }
            } else if current.is_some() {
                buffer.push(line);
            }
        }
        sections.store(current, &buffer);

        sections
    }

    pub fn is_empty(&self) -> bool {
        self.problem_summary.is_none() && self.root_cause.is_none() && self.solution.is_none()
    }

    fn store(&mut self, kind: Option<SectionKind>, lines: &[&str]) {
        let slot = match kind {
            Some(SectionKind::Problem) => &mut self.problem_summary,
            Some(SectionKind::RootCause) => &mut self.root_cause,
            Some(SectionKind::Solution) => &mut self.solution,
            Some(SectionKind::Other) | None => return,
        };

        if slot.is_some() {
            return;
        }

        let text = lines.join("\n").trim().to_string();
        if !text.is_empty() {
            *slot = Some(text);
        }
    }
}
