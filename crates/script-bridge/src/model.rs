//! Wire model exchanged with the in-page audit script.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeError;

/// Request handed to a [`crate::ScriptExecutor`].
///
/// An empty `rules` list asks the page to run every builtin rule. `scope` is a CSS selector
/// limiting the audited subtree; `None` audits the whole document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub rules: Vec<String>,
    pub scope: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RawSeverity {
    #[serde(alias = "error", alias = "Severe", alias = "SEVERE")]
    Error,
    #[serde(alias = "warning", alias = "WARNING")]
    Warning,
}

/// One rule outcome inside one document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRuleResult {
    pub rule_id: String,
    pub severity: RawSeverity,
    #[serde(default)]
    pub selectors: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help_url: Option<String>,
}

/// Raw audit output for one open document, rules in evaluation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAuditResult {
    #[serde(default)]
    pub results: Vec<RawRuleResult>,
}

impl RawAuditResult {
    /// Decode a script response into per-document results.
    ///
    /// Accepts either an array of documents or a single `{results: [...]}` object.
    pub fn parse_documents(value: Value) -> Result<Vec<RawAuditResult>, BridgeError> {
        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map_err(|err| BridgeError::malformed(format!("invalid document list: {err}"))),
            Value::Object(ref map) if map.contains_key("results") => {
                let single: RawAuditResult = serde_json::from_value(value)
                    .map_err(|err| BridgeError::malformed(format!("invalid document: {err}")))?;
                Ok(vec![single])
            }
            other => Err(BridgeError::malformed(format!(
                "unexpected audit payload: {other}"
            ))),
        }
    }
}

/// Result of asking the driver layer to run an audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuditOutcome {
    /// One raw result per open document, in driver enumeration order.
    Completed(Vec<RawAuditResult>),
    /// The active backend has no scripting bridge.
    Unsupported { backend: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeErrorKind;
    use serde_json::json;

    #[test]
    fn parses_document_array() {
        let docs = RawAuditResult::parse_documents(json!([
            {
                "results": [{
                    "ruleId": "AX_ARIA_04",
                    "severity": "Severe",
                    "selectors": ["#AX_ARIA_04_bad"],
                    "description": "ARIA state and property values must be valid"
                }]
            },
            { "results": [] }
        ]))
        .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].results[0].severity, RawSeverity::Error);
        assert_eq!(docs[0].results[0].help_url, None);
        assert!(docs[1].results.is_empty());
    }

    #[test]
    fn parses_single_document_object() {
        let docs = RawAuditResult::parse_documents(json!({
            "results": [{ "ruleId": "AX_COLOR_01", "severity": "warning" }]
        }))
        .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].results[0].severity, RawSeverity::Warning);
        assert!(docs[0].results[0].selectors.is_empty());
    }

    #[test]
    fn rejects_unknown_shapes() {
        let err = RawAuditResult::parse_documents(json!("nope")).unwrap_err();
        assert_eq!(err.kind, BridgeErrorKind::MalformedResponse);

        let err = RawAuditResult::parse_documents(json!([{ "results": [{ "ruleId": 3 }] }]))
            .unwrap_err();
        assert_eq!(err.kind, BridgeErrorKind::MalformedResponse);
    }
}
