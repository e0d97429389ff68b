//! Normalisation of raw audit output into per-document reports.

use pagecheck_policy_center::defaults::DEFAULT_HELP_BASE_URL;
use pagecheck_policy_center::AccessibilityPolicy;
use script_bridge::{RawAuditResult, RawRuleResult, RawSeverity};
use serde::{Deserialize, Serialize};

use crate::catalog::lookup_by_code;

/// Audit outcome for one document. Messages keep rule evaluation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn reports_have_errors(reports: &[Report]) -> bool {
    reports.iter().any(Report::has_errors)
}

/// Turns raw per-rule output into formatted [`Report`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReportBuilder {
    max_reported_elements: usize,
    help_base_url: String,
}

impl Default for AuditReportBuilder {
    fn default() -> Self {
        Self::new(5, DEFAULT_HELP_BASE_URL)
    }
}

impl AuditReportBuilder {
    pub fn new(max_reported_elements: usize, help_base_url: impl Into<String>) -> Self {
        Self {
            max_reported_elements: max_reported_elements.max(1),
            help_base_url: help_base_url.into(),
        }
    }

    pub fn from_policy(policy: &AccessibilityPolicy) -> Self {
        Self::new(policy.max_reported_elements, policy.help_base_url.clone())
    }

    /// One report per raw document, in the order given.
    pub fn build(&self, raw_results: &[RawAuditResult]) -> Vec<Report> {
        raw_results.iter().map(|raw| self.build_one(raw)).collect()
    }

    fn build_one(&self, raw: &RawAuditResult) -> Report {
        let mut report = Report::default();
        for entry in &raw.results {
            let Some(message) = self.format_entry(entry) else {
                continue;
            };
            match entry.severity {
                RawSeverity::Error => report.errors.push(message),
                RawSeverity::Warning => report.warnings.push(message),
            }
        }
        report
    }

    /// Format one rule violation; `None` when the rule matched no element.
    pub fn format_entry(&self, entry: &RawRuleResult) -> Option<String> {
        let total = entry.selectors.len();
        if total == 0 {
            return None;
        }

        let label = match entry.severity {
            RawSeverity::Error => "Error",
            RawSeverity::Warning => "Warning",
        };
        let description = describe(entry);
        let mut message = format!(
            "{}: {} ({}) failed on the following ",
            label, entry.rule_id, description
        );

        if total == 1 {
            message.push_str("element:\n");
            message.push_str(&entry.selectors[0]);
            return Some(message);
        }

        let shown = total.min(self.max_reported_elements);
        message.push_str(&format!("elements (1 - {} of {}):\n", shown, total));
        for selector in entry.selectors.iter().take(shown) {
            message.push_str(selector);
            message.push('\n');
        }
        let help_url = match entry.help_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.help_url(&entry.rule_id, &description),
        };
        message.push_str(&format!("See {} for more information.", help_url));
        Some(message)
    }

    fn help_url(&self, rule_id: &str, description: &str) -> String {
        format!(
            "{}#-{}--{}",
            self.help_base_url,
            rule_id.to_ascii_lowercase(),
            slugify(description)
        )
    }
}

fn describe(entry: &RawRuleResult) -> String {
    if !entry.description.trim().is_empty() {
        return entry.description.clone();
    }
    lookup_by_code(&entry.rule_id)
        .map(|rule| rule.description.to_string())
        .unwrap_or_else(|| entry.rule_id.clone())
}

/// Anchor slug used by the rule documentation: lowercase words joined by `-`, punctuation
/// other than `-` dropped.
fn slugify(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}
