//! In-memory browser session and page definitions shared by the page-object tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axs_audit::{lookup_by_name, AuditRuleSelector, AuditRuleSet, AuditScope};
use page_object::{PageDefinition, PageError};
use pagecheck_policy_center::{default_snapshot, PolicyView};
use script_bridge::{
    AuditOutcome, AuditRequest, BackendKind, BridgeError, BridgeErrorKind, BrowserSession,
    RawAuditResult, RawRuleResult, RawSeverity, ScriptExecutor,
};
use serde_json::{json, Value};

pub const READY_PROBE: &str = "document.readyState === 'complete'";

pub const AX_ARIA_04_ERROR: &str = "Error: AX_ARIA_04 (ARIA state and property values must be valid) failed on the following element:\n#AX_ARIA_04_bad";

pub const AX_ARIA_01_ERROR: &str = "Error: AX_ARIA_01 (Elements with ARIA roles must use a valid, non-abstract ARIA role) failed on the following elements (1 - 2 of 2):\n#AX_ARIA_01_not_a_role\n#AX_ARIA_01_empty_role\nSee https://github.com/GoogleChrome/accessibility-developer-tools/wiki/Audit-Rules#-ax_aria_01--elements-with-aria-roles-must-use-a-valid-non-abstract-aria-role for more information.";

/// Policy with short readiness timings so timeout paths stay fast.
pub fn fast_policy(verify_on_load: bool) -> PolicyView {
    let mut snapshot = default_snapshot();
    snapshot.accessibility.verify_on_load = verify_on_load;
    snapshot.readiness.timeout_ms = 200;
    snapshot.readiness.poll_interval_ms = 5;
    snapshot.view()
}

/// Browser session that becomes ready after a number of probe polls.
pub struct FakeSession {
    backend: BackendKind,
    ready_after: Option<usize>,
    audit_response: Value,
    fail_navigation: bool,
    probe_error_after: Option<usize>,
    pub navigations: Mutex<Vec<String>>,
    pub probes: AtomicUsize,
    pub audit_scripts: AtomicUsize,
}

impl FakeSession {
    pub fn capable() -> Self {
        Self {
            backend: BackendKind::ScriptCapable,
            ready_after: Some(0),
            audit_response: json!({ "status": "ok", "documents": [{ "results": [] }] }),
            fail_navigation: false,
            probe_error_after: None,
            navigations: Mutex::new(Vec::new()),
            probes: AtomicUsize::new(0),
            audit_scripts: AtomicUsize::new(0),
        }
    }

    pub fn incapable() -> Self {
        Self {
            backend: BackendKind::NotScriptCapable,
            ..Self::capable()
        }
    }

    pub fn ready_after(mut self, polls: usize) -> Self {
        self.ready_after = Some(polls);
        self
    }

    pub fn never_ready(mut self) -> Self {
        self.ready_after = None;
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    /// Readiness probe answers `false` for `polls` calls, then fails with a closed session.
    pub fn probe_fails_after(mut self, polls: usize) -> Self {
        self.ready_after = None;
        self.probe_error_after = Some(polls);
        self
    }

    pub fn audit_response(mut self, response: Value) -> Self {
        self.audit_response = response;
        self
    }

    pub fn navigation_count(&self) -> usize {
        self.navigations.lock().unwrap().len()
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    fn backend_name(&self) -> &str {
        match self.backend {
            BackendKind::ScriptCapable => "chrome",
            BackendKind::NotScriptCapable => "firefox",
        }
    }

    fn backend(&self) -> BackendKind {
        self.backend
    }

    async fn navigate(&self, url: &str) -> Result<(), BridgeError> {
        if self.fail_navigation {
            return Err(BridgeError::new(BridgeErrorKind::Navigation).with_hint("connection refused"));
        }
        self.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn evaluate_script(&self, expression: &str) -> Result<Value, BridgeError> {
        if expression == READY_PROBE {
            let seen = self.probes.fetch_add(1, Ordering::SeqCst);
            if matches!(self.probe_error_after, Some(after) if seen >= after) {
                return Err(BridgeError::new(BridgeErrorKind::SessionClosed));
            }
            let ready = matches!(self.ready_after, Some(after) if seen >= after);
            return Ok(Value::Bool(ready));
        }
        self.audit_scripts.fetch_add(1, Ordering::SeqCst);
        Ok(self.audit_response.clone())
    }
}

/// Page with two ARIA violations, only the AX_ARIA_04 one inside `#limit_scope`.
pub struct AccessibilityPage {
    rules: AuditRuleSet,
    scope: AuditScope,
    pub rules_calls: AtomicUsize,
    pub scope_calls: AtomicUsize,
}

impl AccessibilityPage {
    pub fn new() -> Self {
        Self {
            rules: AuditRuleSet::Disabled,
            scope: AuditScope::Document,
            rules_calls: AtomicUsize::new(0),
            scope_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_rules(mut self, rules: AuditRuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_scope(mut self, scope: AuditScope) -> Self {
        self.scope = scope;
        self
    }
}

impl AuditRuleSelector for AccessibilityPage {
    fn rules(&self) -> AuditRuleSet {
        self.rules_calls.fetch_add(1, Ordering::SeqCst);
        self.rules.clone()
    }

    fn scope(&self) -> AuditScope {
        self.scope_calls.fetch_add(1, Ordering::SeqCst);
        self.scope.clone()
    }
}

#[async_trait]
impl PageDefinition for AccessibilityPage {
    fn url(&self) -> Option<String> {
        Some("http://localhost:8003/accessibility.html".to_string())
    }

    async fn is_browser_on_page(&self, session: &dyn BrowserSession) -> Result<bool, PageError> {
        let value = session.evaluate_script(READY_PROBE).await?;
        Ok(value.as_bool().unwrap_or(false))
    }
}

/// Page reached only through interaction.
pub struct ModalPage;

impl AuditRuleSelector for ModalPage {}

#[async_trait]
impl PageDefinition for ModalPage {
    fn url(&self) -> Option<String> {
        None
    }

    async fn is_browser_on_page(&self, _session: &dyn BrowserSession) -> Result<bool, PageError> {
        Ok(true)
    }
}

struct FixtureViolation {
    rule_name: &'static str,
    element: &'static str,
    container: &'static str,
}

const FIXTURE: &[FixtureViolation] = &[
    FixtureViolation {
        rule_name: "badAriaAttributeValue",
        element: "#AX_ARIA_04_bad",
        container: "#limit_scope",
    },
    FixtureViolation {
        rule_name: "badAriaRole",
        element: "#AX_ARIA_01_not_a_role",
        container: "body",
    },
    FixtureViolation {
        rule_name: "badAriaRole",
        element: "#AX_ARIA_01_empty_role",
        container: "body",
    },
];

/// Executor that audits the fixture page in memory, honouring rules and scope.
#[derive(Default)]
pub struct FixtureExecutor {
    pub requests: Mutex<Vec<AuditRequest>>,
}

impl FixtureExecutor {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ScriptExecutor for FixtureExecutor {
    async fn run_audit(&self, request: &AuditRequest) -> Result<AuditOutcome, BridgeError> {
        self.requests.lock().unwrap().push(request.clone());

        let mut results: Vec<RawRuleResult> = Vec::new();
        for violation in FIXTURE {
            if !request.rules.is_empty() && !request.rules.iter().any(|r| r == violation.rule_name)
            {
                continue;
            }
            if let Some(scope) = &request.scope {
                if scope != violation.container {
                    continue;
                }
            }
            let rule = lookup_by_name(violation.rule_name).expect("fixture rule in catalog");
            match results.iter_mut().find(|r| r.rule_id == rule.code) {
                Some(existing) => existing.selectors.push(violation.element.to_string()),
                None => results.push(RawRuleResult {
                    rule_id: rule.code.to_string(),
                    severity: RawSeverity::Error,
                    selectors: vec![violation.element.to_string()],
                    description: rule.description.to_string(),
                    help_url: None,
                }),
            }
        }
        Ok(AuditOutcome::Completed(vec![RawAuditResult { results }]))
    }
}
