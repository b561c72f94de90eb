//! Built-in keyword, safety and pattern tables

use super::classifier::{DomainKeywords, WeightedKeyword};
use super::entity::{IndustrialDomain, RiskLevel};
use super::hallucination::PatternRule;
use super::safety::SafetyRule;

/// Specific phrases and standard identifiers
const PHRASE: f64 = 2.0;
/// Single generic words
const WORD: f64 = 1.0;

const PLC_PROGRAMMING: &[(&str, f64)] = &[
    ("plc", WORD),
    ("pid", WORD),
    ("ladder logic", PHRASE),
    ("structured text", PHRASE),
    ("function block", PHRASE),
    ("iec 61131", PHRASE),
    ("siemens", WORD),
    ("allen-bradley", WORD),
    ("codesys", WORD),
    ("tia portal", PHRASE),
    ("scan time", PHRASE),
    ("i/o module", PHRASE),
    ("digital input", PHRASE),
    ("analog output", PHRASE),
];

const SCADA_SYSTEMS: &[(&str, f64)] = &[
    ("scada", WORD),
    ("hmi", WORD),
    ("supervisory", WORD),
    ("data acquisition", PHRASE),
    ("historian", WORD),
    ("trend", WORD),
    ("alarm management", PHRASE),
    ("opc", WORD),
];

const BUILDING_AUTOMATION: &[(&str, f64)] = &[
    ("building automation", PHRASE),
    ("bas", WORD),
    ("hvac", WORD),
    ("bacnet", WORD),
    ("knx", WORD),
    ("dali", WORD),
    ("vav", WORD),
    ("ahu", WORD),
    ("chiller", WORD),
    ("boiler", WORD),
    ("bms", WORD),
    ("building management", PHRASE),
    ("energy efficiency", PHRASE),
];

const PREDICTIVE_MAINTENANCE: &[(&str, f64)] = &[
    ("predictive maintenance", PHRASE),
    ("condition monitoring", PHRASE),
    ("vibration", WORD),
    ("remaining useful life", PHRASE),
    ("fault detection", PHRASE),
    ("diagnostics", WORD),
    ("mtbf", WORD),
    ("mttr", WORD),
    ("reliability", WORD),
    ("degradation", WORD),
];

const INDUSTRIAL_IOT: &[(&str, f64)] = &[
    ("industrial iot", PHRASE),
    ("iiot", WORD),
    ("mqtt", WORD),
    ("opc ua", PHRASE),
    ("edge computing", PHRASE),
    ("gateway", WORD),
    ("sensor network", PHRASE),
    ("digital twin", PHRASE),
];

const MANUFACTURING_EXECUTION: &[(&str, f64)] = &[
    ("mes", WORD),
    ("manufacturing execution", PHRASE),
    ("production planning", PHRASE),
    ("quality management", PHRASE),
    ("sap", WORD),
    ("erp integration", PHRASE),
    ("isa-95", PHRASE),
];

const ALARM_MANAGEMENT: &[(&str, f64)] = &[
    ("alarm", WORD),
    ("alert", WORD),
    ("notification", WORD),
    ("isa-18.2", PHRASE),
    ("alarm rationalization", PHRASE),
    ("alarm flood", PHRASE),
    ("shelving", WORD),
];

const ENERGY_MANAGEMENT: &[(&str, f64)] = &[
    ("energy management", PHRASE),
    ("power monitoring", PHRASE),
    ("load shedding", PHRASE),
    ("demand response", PHRASE),
    ("iso 50001", PHRASE),
    ("energy audit", PHRASE),
];

fn domain_entry(domain: IndustrialDomain, keywords: &[(&str, f64)]) -> DomainKeywords {
    DomainKeywords::new(
        domain,
        keywords
            .iter()
            .map(|(term, weight)| WeightedKeyword::new(*term, *weight))
            .collect(),
    )
}

/// Domain keyword table in classification priority order
pub fn default_domain_keywords() -> Vec<DomainKeywords> {
    vec![
        domain_entry(IndustrialDomain::PlcProgramming, PLC_PROGRAMMING),
        domain_entry(IndustrialDomain::ScadaSystems, SCADA_SYSTEMS),
        domain_entry(IndustrialDomain::BuildingAutomation, BUILDING_AUTOMATION),
        domain_entry(IndustrialDomain::PredictiveMaintenance, PREDICTIVE_MAINTENANCE),
        domain_entry(IndustrialDomain::IndustrialIot, INDUSTRIAL_IOT),
        domain_entry(IndustrialDomain::ManufacturingExecution, MANUFACTURING_EXECUTION),
        domain_entry(IndustrialDomain::AlarmManagement, ALARM_MANAGEMENT),
        domain_entry(IndustrialDomain::EnergyManagement, ENERGY_MANAGEMENT),
    ]
}

/// Safety rules in warning output order
pub fn default_safety_rules() -> Vec<SafetyRule> {
    vec![
        SafetyRule::new(
            &["high voltage"],
            RiskLevel::Critical,
            "IEC 60204-1",
            "High voltage hazard: qualified personnel only",
        ),
        SafetyRule::new(
            &["electrical shock", "shock hazard", "electric shock", "arc flash"],
            RiskLevel::Critical,
            "NFPA 70E",
            "Electrical shock and arc flash hazard: de-energize and use rated PPE",
        ),
        SafetyRule::new(
            &["lockout", "tagout", "loto"],
            RiskLevel::Critical,
            "OSHA 1910.147",
            "Lockout/Tagout required before maintenance",
        ),
        SafetyRule::new(
            &["emergency stop", "e-stop"],
            RiskLevel::High,
            "IEC 60204-1",
            "Emergency stop circuits must comply with stop category requirements",
        ),
        SafetyRule::new(
            &["safety plc"],
            RiskLevel::High,
            "IEC 61508",
            "Safety PLCs must meet SIL requirements",
        ),
        SafetyRule::new(
            &["sil", "safety integrity level"],
            RiskLevel::High,
            "IEC 61508/61511",
            "Safety Integrity Level: verify against functional safety standards",
        ),
        SafetyRule::new(
            &["explosive", "hazardous area", "atex"],
            RiskLevel::Critical,
            "ATEX/IECEx",
            "Hazardous area classification required",
        ),
        SafetyRule::new(
            &["pressure vessel"],
            RiskLevel::High,
            "ASME BPVC",
            "Pressure equipment must comply with local regulations",
        ),
        SafetyRule::new(
            &["chemical"],
            RiskLevel::High,
            "OSHA 1910.1200",
            "Chemical safety assessment required (SDS review)",
        ),
        SafetyRule::new(
            &["robot"],
            RiskLevel::Medium,
            "ISO 10218",
            "Robotic safety per ISO 10218 / ISO/TS 15066",
        ),
    ]
}

/// Hallucination red-flag patterns in flag output order
pub fn default_hallucination_patterns() -> Vec<PatternRule> {
    vec![
        PatternRule::new(
            "overconfident_claim",
            r"(?i)\bi(?:'m| am) (?:sure|certain|100%)",
            "Overconfident claim without source",
        ),
        PatternRule::new(
            "temporal_reference",
            r"(?i)\bas of (?:my|the) (?:last|latest) (?:update|training)",
            "Potential temporal hallucination",
        ),
        PatternRule::new(
            "unverifiable_source",
            r"(?i)\baccording to .{0,30}(?:official|documentation)",
            "Unverifiable source claim",
        ),
        PatternRule::new(
            "fabricated_citation",
            r"\([A-Z][A-Za-z'-]+(?: et al\.| and [A-Z][A-Za-z'-]+)?,? (?:19|20)\d{2}[a-z]?\)",
            "Academic-style citation that cannot be traced to a provided source",
        ),
        PatternRule::new(
            "specific_date",
            r"\b\d{4}-\d{2}-\d{2}\b",
            "Specific date claim: verify accuracy",
        ),
        PatternRule::new(
            "absolute_certainty",
            r"(?i)\b(?:always|never|guaranteed|definitely|certainly|100% (?:safe|reliable|accurate))\b",
            "Absolute statement: may not hold in all cases",
        ),
        PatternRule::new(
            "unqualified_precision",
            r"\b\d+\.\d{3,}\s?%",
            "Numeric claim with implausible precision and no stated source",
        ),
    ]
}

/// Hedging terms lowering answer confidence
pub const HEDGE_TERMS: &[&str] = &[
    "might",
    "perhaps",
    "possibly",
    "maybe",
    "could",
    "i think",
    "not sure",
    "unclear",
    "it depends",
];
