use crate::model::{AccessibilityPolicy, PolicySnapshot, ReadinessPolicy};

pub const DEFAULT_HELP_BASE_URL: &str =
    "https://github.com/GoogleChrome/accessibility-developer-tools/wiki/Audit-Rules";

pub fn default_snapshot() -> PolicySnapshot {
    PolicySnapshot {
        rev: 1,
        accessibility: AccessibilityPolicy {
            verify_on_load: false,
            max_reported_elements: 5,
            help_base_url: DEFAULT_HELP_BASE_URL.to_string(),
        },
        readiness: ReadinessPolicy {
            timeout_ms: 30_000,
            poll_interval_ms: 500,
        },
        provenance: Default::default(),
    }
}
