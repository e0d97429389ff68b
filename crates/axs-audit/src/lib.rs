//! Accessibility audit pipeline pieces that do not touch the browser.
//!
//! - rule and scope selection ([`AuditRuleSelector`])
//! - the builtin rule catalog
//! - normalisation of raw per-document output into [`Report`]s

pub mod catalog;
pub mod report;
pub mod rules;

pub use catalog::{lookup_by_code, lookup_by_name, RuleInfo, BUILTIN_RULES};
pub use report::{reports_have_errors, AuditReportBuilder, Report};
pub use rules::{AuditRuleSelector, AuditRuleSet, AuditScope};
