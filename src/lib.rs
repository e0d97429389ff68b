//! PageCheck library
//!
//! Page objects for browser-driven UI tests with accessibility auditing built into the
//! page-load lifecycle. Re-exports the workspace crates under one roof.

pub use axs_audit::{
    reports_have_errors, AuditReportBuilder, AuditRuleSelector, AuditRuleSet, AuditScope, Report,
};
pub use page_object::{
    AuditBackend, LoadAuditor, LoadProbe, PageDefinition, PageError, PageObject,
    ReadinessController, ReadinessState,
};
pub use pagecheck_policy_center::{
    load_snapshot, AccessibilityPolicy, LoadVerdict, PolicySnapshot, PolicyView,
    ReadinessPolicy,
};
pub use script_bridge::{
    AuditOutcome, AuditRequest, BackendKind, BridgeError, BrowserSession, RawAuditResult,
    ScriptExecutor, SessionScriptExecutor,
};
