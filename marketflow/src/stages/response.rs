//! Turning raw model output into typed records.

use serde::de::DeserializeOwned;

use crate::errors::StageError;

/// Removes an optional Markdown code fence around a model reply.
///
/// Trims, strips a leading "```json" (or a bare "```"), strips a trailing
/// "```", then trims again. Text without fences is only trimmed.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses a model reply into `T`.
///
/// Invalid JSON is reported as [`StageError::MalformedJson`]; valid JSON of the
/// wrong shape as [`StageError::Schema`].
pub fn parse_stage_output<T: DeserializeOwned>(raw: &str) -> Result<T, StageError> {
    let value: serde_json::Value = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| StageError::MalformedJson(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| StageError::Schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MarketingStrategy, TrendAnalysis};
    use pretty_assertions::assert_eq;

    const STRATEGY: &str = r#"{
        "name": "Launch",
        "goals": ["Reach 1000 users"],
        "tactics": ["Webinars"],
        "channels": ["LinkedIn"],
        "KPIs": ["Signups"]
    }"#;

    #[test]
    fn test_strip_code_fences_variants() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_fenced_and_plain_output_parse_identically() {
        let plain: MarketingStrategy = parse_stage_output(STRATEGY).unwrap();
        let fenced: MarketingStrategy =
            parse_stage_output(&format!("```json\n{STRATEGY}\n```")).unwrap();
        assert_eq!(plain, fenced);
        assert_eq!(plain.kpis, vec!["Signups".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_stage_output::<MarketingStrategy>("Sure! Here is your strategy.").unwrap_err();
        assert_eq!(err.kind(), "malformed_json");
    }

    #[test]
    fn test_missing_key_is_schema_error() {
        let err = parse_stage_output::<TrendAnalysis>(r#"{"market_trends": []}"#).unwrap_err();
        assert_eq!(err.kind(), "schema");
        assert!(err.to_string().contains("tech_trends"));
    }
}
