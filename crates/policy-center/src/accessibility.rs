//! Decisions derived from the accessibility section of the policy.

use crate::model::AccessibilityPolicy;

/// What the readiness wait should do with the outcome of an implicit audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadVerdict {
    /// Audit-on-load is off; the wait never audits.
    NotEngaged,
    /// Audit ran and found no errors. Warnings never fail a load.
    Clean,
    /// Audit found at least one error; the wait must fail.
    Violation { error_count: usize },
}

impl AccessibilityPolicy {
    pub fn audit_on_load(&self) -> bool {
        self.verify_on_load
    }

    pub fn load_verdict(&self, error_count: usize) -> LoadVerdict {
        if !self.verify_on_load {
            return LoadVerdict::NotEngaged;
        }
        if error_count == 0 {
            LoadVerdict::Clean
        } else {
            LoadVerdict::Violation { error_count }
        }
    }
}
