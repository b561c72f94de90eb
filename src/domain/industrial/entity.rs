//! Industrial analysis value types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Supported industrial automation domains
///
/// Variants are declared in classification priority order: when two domains
/// score the same, the one declared first wins. `Unknown` is the fallback and
/// is never produced by keyword scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustrialDomain {
    #[serde(rename = "PLC Programming")]
    PlcProgramming,
    #[serde(rename = "SCADA Systems")]
    ScadaSystems,
    #[serde(rename = "Building Automation")]
    BuildingAutomation,
    #[serde(rename = "Predictive Maintenance")]
    PredictiveMaintenance,
    #[serde(rename = "Industrial IoT")]
    IndustrialIot,
    #[serde(rename = "Manufacturing Execution Systems")]
    ManufacturingExecution,
    #[serde(rename = "Alarm Management")]
    AlarmManagement,
    #[serde(rename = "Energy Management")]
    EnergyManagement,
    #[serde(rename = "General")]
    Unknown,
}

impl IndustrialDomain {
    /// Every classifiable domain, in priority order
    pub const CLASSIFIABLE: [IndustrialDomain; 8] = [
        Self::PlcProgramming,
        Self::ScadaSystems,
        Self::BuildingAutomation,
        Self::PredictiveMaintenance,
        Self::IndustrialIot,
        Self::ManufacturingExecution,
        Self::AlarmManagement,
        Self::EnergyManagement,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::PlcProgramming => "PLC Programming",
            Self::ScadaSystems => "SCADA Systems",
            Self::BuildingAutomation => "Building Automation",
            Self::PredictiveMaintenance => "Predictive Maintenance",
            Self::IndustrialIot => "Industrial IoT",
            Self::ManufacturingExecution => "Manufacturing Execution Systems",
            Self::AlarmManagement => "Alarm Management",
            Self::EnergyManagement => "Energy Management",
            Self::Unknown => "General",
        }
    }

    /// Short identifier used on the command line and in metric labels
    pub fn slug(&self) -> &'static str {
        match self {
            Self::PlcProgramming => "plc-programming",
            Self::ScadaSystems => "scada-systems",
            Self::BuildingAutomation => "building-automation",
            Self::PredictiveMaintenance => "predictive-maintenance",
            Self::IndustrialIot => "industrial-iot",
            Self::ManufacturingExecution => "manufacturing-execution",
            Self::AlarmManagement => "alarm-management",
            Self::EnergyManagement => "energy-management",
            Self::Unknown => "general",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for IndustrialDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IndustrialDomain {
    type Err = DomainError;

    /// Accepts either the slug (`plc-programming`) or the label (`PLC Programming`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Self::CLASSIFIABLE
            .iter()
            .chain(std::iter::once(&Self::Unknown))
            .find(|d| d.slug() == needle || d.label().eq_ignore_ascii_case(needle))
            .copied()
            .or_else(|| needle.eq_ignore_ascii_case("unknown").then_some(Self::Unknown))
            .ok_or_else(|| DomainError::invalid_input(format!("Unknown domain '{}'", s)))
    }
}

/// Discrete confidence derived from the numeric confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk classification, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// The next level up, saturating at `Critical`
    pub fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribution to a retrieved source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAttribution {
    pub document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Relevance in [0, 1] as reported by the retriever
    pub relevance_score: f64,
    #[serde(default)]
    pub excerpt: String,
}

impl SourceAttribution {
    pub fn new(document: impl Into<String>, relevance_score: f64) -> Self {
        Self {
            document: document.into(),
            section: None,
            relevance_score,
            excerpt: String::new(),
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }
}

/// Safety warning raised by a safety-critical term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyWarning {
    /// Standard the warning refers to, e.g. "IEC 61508"
    pub standard_reference: String,
    /// Term that triggered the warning
    pub keyword: String,
    pub severity: RiskLevel,
    pub message: String,
}

/// Advisory marker for text that resembles fabricated or overconfident claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallucinationFlag {
    pub pattern_id: String,
    pub matched_text: String,
    /// Byte offset of the match start in the answer text
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
    pub rationale: String,
}
