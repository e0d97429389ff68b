use serde_json::Value;

use crate::errors::PolicyError;
use crate::model::{PolicySnapshot, PolicySource};

/// Every dot-path a policy layer may set.
pub(crate) const POLICY_PATHS: &[&str] = &[
    "accessibility.verify_on_load",
    "accessibility.max_reported_elements",
    "accessibility.help_base_url",
    "readiness.timeout_ms",
    "readiness.poll_interval_ms",
];

pub(crate) fn apply_override_to_snapshot(
    snapshot: &mut PolicySnapshot,
    path: &str,
    value: &Value,
    source: PolicySource,
) -> Result<(), PolicyError> {
    let changed = match path {
        "accessibility.verify_on_load" => merge(
            &mut snapshot.accessibility.verify_on_load,
            to_bool(value)?,
        ),
        "accessibility.max_reported_elements" => merge(
            &mut snapshot.accessibility.max_reported_elements,
            to_positive_usize(value)?,
        ),
        "accessibility.help_base_url" => merge(
            &mut snapshot.accessibility.help_base_url,
            to_string(value)?,
        ),
        "readiness.timeout_ms" => merge(&mut snapshot.readiness.timeout_ms, to_u64(value)?),
        "readiness.poll_interval_ms" => merge(
            &mut snapshot.readiness.poll_interval_ms,
            to_positive_u64(value)?,
        ),
        path => return Err(PolicyError::UnsupportedPath(path.to_string())),
    };
    if changed {
        snapshot.set_provenance(path, source);
    }
    Ok(())
}

fn merge<T: PartialEq>(target: &mut T, candidate: T) -> bool {
    if *target == candidate {
        return false;
    }
    *target = candidate;
    true
}

fn to_u64(value: &Value) -> Result<u64, PolicyError> {
    value
        .as_u64()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected unsigned integer, got {value}")))
}

fn to_positive_u64(value: &Value) -> Result<u64, PolicyError> {
    match to_u64(value)? {
        0 => Err(PolicyError::InvalidValue("value must be greater than zero".into())),
        v => Ok(v),
    }
}

fn to_positive_usize(value: &Value) -> Result<usize, PolicyError> {
    let raw = to_positive_u64(value)?;
    usize::try_from(raw).map_err(|_| PolicyError::InvalidValue(format!("value {raw} too large")))
}

fn to_bool(value: &Value) -> Result<bool, PolicyError> {
    value
        .as_bool()
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected bool, got {value}")))
}

fn to_string(value: &Value) -> Result<String, PolicyError> {
    value
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| PolicyError::InvalidValue(format!("expected string, got {value}")))
}
