//! Metric recording through the `metrics` facade
//!
//! Nothing here installs a recorder; without one every call is a no-op.

use std::time::Duration;

use metrics::{counter, histogram};

use crate::domain::IndustrialResponse;

/// Record the outcome of one analysed response
pub fn record_analysis(response: &IndustrialResponse) {
    let labels = [
        ("domain", response.domain().slug().to_string()),
        ("confidence", response.confidence().as_str().to_string()),
        ("risk", response.risk_level().as_str().to_string()),
    ];

    counter!("industrial_responses_total", &labels).increment(1);
    histogram!("industrial_confidence_score").record(response.confidence_score());

    for warning in response.safety_warnings() {
        counter!(
            "industrial_safety_warnings_total",
            "standard" => warning.standard_reference.clone()
        )
        .increment(1);
    }

    for flag in response.hallucination_flags() {
        counter!(
            "industrial_hallucination_flags_total",
            "pattern" => flag.pattern_id.clone()
        )
        .increment(1);
    }
}

/// Record an LLM request metric
pub fn record_llm_request(params: LlmRequestMetricParams) {
    let labels = [
        ("provider", params.provider.to_string()),
        ("model", params.model.to_string()),
        ("status", if params.success { "success" } else { "error" }.to_string()),
    ];

    counter!("llm_requests_total", &labels).increment(1);
    histogram!("llm_request_duration_seconds", &labels).record(params.duration.as_secs_f64());

    if let Some(tokens) = params.input_tokens {
        counter!("llm_input_tokens_total", &labels).increment(tokens);
    }

    if let Some(tokens) = params.output_tokens {
        counter!("llm_output_tokens_total", &labels).increment(tokens);
    }
}

/// Parameters for LLM request metrics
pub struct LlmRequestMetricParams<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    pub duration: Duration,
    pub success: bool,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisConfig, ResponseQualityPipeline};

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let pipeline = ResponseQualityPipeline::new(&AnalysisConfig::default()).unwrap();
        let response = pipeline
            .analyze(
                "lockout on the PLC cabinet",
                Vec::new(),
                "This is always safe.",
                "gpt-4o",
                1.0,
            )
            .unwrap();

        record_analysis(&response);
        record_llm_request(LlmRequestMetricParams {
            provider: "openai",
            model: "gpt-4o",
            duration: Duration::from_millis(500),
            success: false,
            input_tokens: None,
            output_tokens: None,
        });
    }
}
