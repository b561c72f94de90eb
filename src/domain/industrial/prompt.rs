//! Domain-specific system prompts

use super::entity::IndustrialDomain;

const BASE_RULES: &str = "You are an expert Industrial AI Knowledge Assistant specializing in \
industrial automation, building automation, and manufacturing systems.

RESPONSE RULES:
1. Be precise and technical. Cite specific standards (IEC, ISO, ASHRAE) when relevant.
2. If you are unsure, explicitly state your uncertainty level.
3. NEVER fabricate specific product models, firmware versions, or configuration values.
4. For safety-critical topics, always include relevant safety warnings.
5. Structure your response clearly with sections when appropriate.
6. When troubleshooting, follow: Problem -> Root Cause -> Solution -> Risk Assessment.
7. Reference the provided context documents when available.
8. If the question is outside your knowledge, say so rather than guessing.

";

fn domain_focus(domain: IndustrialDomain) -> &'static str {
    match domain {
        IndustrialDomain::PlcProgramming => {
            "DOMAIN FOCUS: PLC Programming
- Reference IEC 61131-3 programming languages
- Consider scan time impacts and real-time constraints
- Include safety considerations for machine control
"
        }
        IndustrialDomain::ScadaSystems => {
            "DOMAIN FOCUS: SCADA Systems
- Consider cybersecurity (IEC 62443)
- Address alarm management best practices (ISA-18.2)
- Include data historian and trending guidance
"
        }
        IndustrialDomain::BuildingAutomation => {
            "DOMAIN FOCUS: Building Automation
- Reference BACnet, KNX, and DALI protocols
- Consider energy efficiency (ASHRAE standards)
- Address HVAC control strategies
"
        }
        IndustrialDomain::PredictiveMaintenance => {
            "DOMAIN FOCUS: Predictive Maintenance
- Include condition monitoring techniques
- Reference reliability engineering concepts
- Consider sensor selection and data requirements
"
        }
        IndustrialDomain::IndustrialIot => {
            "DOMAIN FOCUS: Industrial IoT
- Reference OPC UA and MQTT for plant-floor connectivity
- Consider edge versus cloud processing trade-offs
- Address device security and network segmentation (IEC 62443)
"
        }
        IndustrialDomain::ManufacturingExecution => {
            "DOMAIN FOCUS: Manufacturing Execution Systems
- Reference the ISA-95 functional hierarchy
- Address ERP integration boundaries and data ownership
- Consider traceability and quality management requirements
"
        }
        IndustrialDomain::AlarmManagement => {
            "DOMAIN FOCUS: Alarm Management
- Follow the ISA-18.2 alarm management lifecycle
- Address alarm rationalization, prioritization, and shelving
- Consider alarm flood prevention and operator load
"
        }
        IndustrialDomain::EnergyManagement => {
            "DOMAIN FOCUS: Energy Management
- Reference ISO 50001 energy management systems
- Address metering, power monitoring, and load shedding
- Consider demand response programs and energy audits
"
        }
        IndustrialDomain::Unknown => "DOMAIN FOCUS: General Industrial Automation\n",
    }
}

/// Build the system prompt sent to the LLM for a query in `domain`
pub fn build_system_prompt(domain: IndustrialDomain) -> String {
    let focus = domain_focus(domain);
    let mut prompt = String::with_capacity(BASE_RULES.len() + focus.len());
    prompt.push_str(BASE_RULES);
    prompt.push_str(focus);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plc_prompt_contains_iec() {
        let prompt = build_system_prompt(IndustrialDomain::PlcProgramming);
        assert!(prompt.contains("IEC 61131"));
    }

    #[test]
    fn test_scada_prompt_contains_cybersecurity() {
        let prompt = build_system_prompt(IndustrialDomain::ScadaSystems);
        assert!(prompt.to_lowercase().contains("cybersecurity") || prompt.contains("62443"));
    }

    #[test]
    fn test_bas_prompt_contains_bacnet() {
        let prompt = build_system_prompt(IndustrialDomain::BuildingAutomation);
        assert!(prompt.contains("BACnet"));
    }

    #[test]
    fn test_general_prompt_has_base_rules() {
        let prompt = build_system_prompt(IndustrialDomain::Unknown);
        assert!(prompt.contains("NEVER fabricate"));
        assert!(prompt.to_lowercase().contains("safety"));
        assert!(prompt.ends_with("General Industrial Automation\n"));
    }

    #[test]
    fn test_every_domain_has_a_focus_block() {
        for domain in IndustrialDomain::CLASSIFIABLE {
            let prompt = build_system_prompt(domain);
            assert!(
                prompt.contains(&format!("DOMAIN FOCUS: {}", domain.label())),
                "missing focus for {}",
                domain
            );
        }
    }
}
