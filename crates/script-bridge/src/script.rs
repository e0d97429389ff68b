//! In-page audit script.
//!
//! The script expects the axs audit library to be present on the page. It audits the top
//! document plus every same-origin frame document and reports only failing rules.

use crate::error::BridgeError;
use crate::model::AuditRequest;

pub const STATUS_OK: &str = "ok";
pub const STATUS_AXS_UNAVAILABLE: &str = "axs_unavailable";

const AUDIT_TEMPLATE: &str = r#"(() => {
    if (typeof axs === 'undefined' || !axs.Audit) {
        return { status: 'axs_unavailable' };
    }
    const rules = __RULES__;
    const scopeSelector = __SCOPE__;
    const docs = [document];
    for (const frame of Array.from(document.querySelectorAll('iframe, frame'))) {
        try {
            if (frame.contentDocument) { docs.push(frame.contentDocument); }
        } catch (err) {}
    }
    const documents = docs.map((doc) => {
        const config = new axs.AuditConfiguration();
        config.showUnsupportedRulesWarning = false;
        if (rules.length > 0) { config.auditRulesToRun = rules; }
        if (scopeSelector !== null) {
            const scope = doc.querySelector(scopeSelector);
            if (!scope) { return { results: [] }; }
            config.scope = scope;
        } else {
            config.scope = doc;
        }
        const failed = axs.Audit.run(config)
            .filter((r) => r.result === axs.constants.AuditResult.FAIL);
        return {
            results: failed.map((r) => ({
                ruleId: r.rule.code,
                severity: r.rule.severity,
                selectors: (r.elements || []).map((el) => axs.utils.getQuerySelectorText(el)),
                description: r.rule.heading
            }))
        };
    });
    return { status: 'ok', documents };
})()"#;

/// Render the audit expression for `request`.
pub fn build_audit_script(request: &AuditRequest) -> Result<String, BridgeError> {
    let rules = serde_json::to_string(&request.rules)
        .map_err(|err| BridgeError::malformed(format!("invalid rule encoding: {err}")))?;
    let scope = serde_json::to_string(&request.scope)
        .map_err(|err| BridgeError::malformed(format!("invalid scope encoding: {err}")))?;
    Ok(AUDIT_TEMPLATE
        .replace("__RULES__", &rules)
        .replace("__SCOPE__", &scope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_rules_and_scope_as_literals() {
        let script = build_audit_script(&AuditRequest {
            rules: vec!["badAriaRole".into()],
            scope: Some("#limit_scope".into()),
        })
        .unwrap();
        assert!(script.contains(r#"const rules = ["badAriaRole"];"#));
        assert!(script.contains(r##"const scopeSelector = "#limit_scope";"##));
        assert!(!script.contains("__RULES__"));
    }

    #[test]
    fn whole_document_scope_is_null() {
        let script = build_audit_script(&AuditRequest::default()).unwrap();
        assert!(script.contains("const rules = [];"));
        assert!(script.contains("const scopeSelector = null;"));
    }

    #[test]
    fn selector_quotes_are_escaped() {
        let script = build_audit_script(&AuditRequest {
            rules: Vec::new(),
            scope: Some(r#"div[data-x="a"]"#.into()),
        })
        .unwrap();
        assert!(script.contains(r#"const scopeSelector = "div[data-x=\"a\"]";"#));
    }
}
