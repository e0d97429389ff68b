use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fully resolved run-wide policy. Built once before any page object exists.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PolicySnapshot {
    pub rev: u64,
    pub accessibility: AccessibilityPolicy,
    pub readiness: ReadinessPolicy,
    pub provenance: HashMap<String, PolicyProvenance>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AccessibilityPolicy {
    /// Run an implicit audit every time a page reaches readiness.
    pub verify_on_load: bool,
    /// Selectors listed per message before the list is truncated.
    pub max_reported_elements: usize,
    /// Documentation page the per-rule help anchors hang off.
    pub help_base_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl ReadinessPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicyProvenance {
    pub path: String,
    pub source: PolicySource,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PolicySource {
    Builtin,
    File,
    Env,
    Legacy,
}

/// Read-only view handed to page objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyView {
    pub rev: u64,
    pub accessibility: AccessibilityPolicy,
    pub readiness: ReadinessPolicy,
}

impl From<PolicySnapshot> for PolicyView {
    fn from(snapshot: PolicySnapshot) -> Self {
        Self {
            rev: snapshot.rev,
            accessibility: snapshot.accessibility,
            readiness: snapshot.readiness,
        }
    }
}

impl PolicySnapshot {
    pub fn set_provenance(&mut self, path: &str, source: PolicySource) {
        self.provenance.insert(
            path.to_string(),
            PolicyProvenance {
                path: path.to_string(),
                source,
            },
        );
    }

    pub fn view(&self) -> PolicyView {
        PolicyView::from(self.clone())
    }
}
