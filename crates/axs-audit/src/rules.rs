use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::lookup_by_name;

/// Which rules an audit runs.
///
/// `Disabled` is the sentinel a page object starts with: auditing is a no-op. `All` runs
/// every builtin rule and `Only` runs the named rules in the given order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditRuleSet {
    #[default]
    Disabled,
    All,
    Only(Vec<String>),
}

impl AuditRuleSet {
    /// Build from an explicit rule list; an empty list means every builtin rule.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules: Vec<String> = rules.into_iter().map(Into::into).collect();
        if rules.is_empty() {
            AuditRuleSet::All
        } else {
            AuditRuleSet::Only(rules)
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, AuditRuleSet::Disabled)
    }

    /// Rule names to send to the page. `None` when auditing is disabled.
    pub fn request_rules(&self) -> Option<Vec<String>> {
        match self {
            AuditRuleSet::Disabled => None,
            AuditRuleSet::All => Some(Vec::new()),
            AuditRuleSet::Only(rules) => {
                for rule in rules {
                    if lookup_by_name(rule).is_none() {
                        warn!(rule = %rule, "rule is not in the builtin catalog; forwarding as-is");
                    }
                }
                Some(rules.clone())
            }
        }
    }
}

/// DOM subtree an audit is restricted to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditScope {
    #[default]
    Document,
    Selector(String),
}

impl AuditScope {
    pub fn selector(selector: impl Into<String>) -> Self {
        AuditScope::Selector(selector.into())
    }

    pub fn as_selector(&self) -> Option<&str> {
        match self {
            AuditScope::Document => None,
            AuditScope::Selector(selector) => Some(selector.as_str()),
        }
    }
}

/// Per-page choice of audit rules and scope.
///
/// Both methods are re-evaluated on every audit; nothing is cached.
pub trait AuditRuleSelector: Send + Sync {
    fn rules(&self) -> AuditRuleSet {
        AuditRuleSet::Disabled
    }

    fn scope(&self) -> AuditScope {
        AuditScope::Document
    }
}
