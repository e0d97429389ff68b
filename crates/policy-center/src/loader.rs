//! Layered policy resolution.
//!
//! Lowest to highest precedence: builtin defaults, YAML files (in the order given),
//! `PAGECHECK_POLICY__<SECTION>__<FIELD>` variables, the `PAGECHECK_POLICY_OVERRIDE_JSON`
//! document, and finally the legacy `VERIFY_ACCESSIBILITY` switch.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::apply::{apply_override_to_snapshot, POLICY_PATHS};
use crate::defaults::default_snapshot;
use crate::errors::PolicyError;
use crate::model::{PolicySnapshot, PolicySource};

const ENV_PREFIX: &str = "PAGECHECK_POLICY__";
const ENV_JSON: &str = "PAGECHECK_POLICY_OVERRIDE_JSON";
const ENV_VERIFY_ACCESSIBILITY: &str = "VERIFY_ACCESSIBILITY";

#[derive(Debug, Default)]
pub struct LoadOptions {
    pub paths: Vec<PathBuf>,
    pub include_env: bool,
    pub include_legacy_env: bool,
}

impl LoadOptions {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
            include_env: true,
            include_legacy_env: true,
        }
    }
}

/// Resolve the run policy from an optional file plus the process environment.
pub fn load_snapshot(path: Option<&Path>) -> Result<PolicySnapshot, PolicyError> {
    load_snapshot_with_options(&LoadOptions {
        paths: path.map(Path::to_path_buf).into_iter().collect(),
        include_env: true,
        include_legacy_env: true,
    })
}

pub fn load_snapshot_with_options(options: &LoadOptions) -> Result<PolicySnapshot, PolicyError> {
    let mut snapshot = default_snapshot();
    for path in POLICY_PATHS {
        snapshot.set_provenance(path, PolicySource::Builtin);
    }

    let mut layers = Vec::new();
    for path in &options.paths {
        if !path.exists() {
            debug!(path = %path.display(), "policy file missing; skipping");
            continue;
        }
        layers.extend(file_settings(path)?);
    }
    if options.include_env {
        layers.extend(prefixed_env_settings());
        layers.extend(json_env_settings()?);
    }
    if options.include_legacy_env {
        layers.extend(legacy_verify_setting());
    }

    for setting in layers {
        apply_override_to_snapshot(&mut snapshot, &setting.path, &setting.value, setting.source)?;
    }
    debug!(
        verify_on_load = snapshot.accessibility.verify_on_load,
        timeout_ms = snapshot.readiness.timeout_ms,
        "policy resolved"
    );
    Ok(snapshot)
}

/// One dot-path assignment contributed by a layer.
struct Setting {
    path: String,
    value: Value,
    source: PolicySource,
}

fn file_settings(path: &Path) -> Result<Vec<Setting>, PolicyError> {
    let content = fs::read_to_string(path)
        .map_err(|err| PolicyError::Io(format!("{}: {}", path.display(), err)))?;
    let document: Value = serde_yaml::from_str(&content)
        .map_err(|err| PolicyError::Invalid(format!("{}: {}", path.display(), err)))?;
    section_settings(document, PolicySource::File)
}

/// Split a `{section: {field: value}}` document into settings.
///
/// Anything nested deeper is handed to the override step as-is and rejected there.
fn section_settings(document: Value, source: PolicySource) -> Result<Vec<Setting>, PolicyError> {
    let sections = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Object(sections) => sections,
        other => {
            return Err(PolicyError::Invalid(format!(
                "policy document must be a mapping of sections, got {other}"
            )))
        }
    };

    let mut settings = Vec::new();
    for (section, body) in sections {
        let section = section.trim().to_ascii_lowercase();
        match body {
            Value::Object(fields) => {
                settings.extend(fields.into_iter().map(|(field, value)| Setting {
                    path: format!("{}.{}", section, field.trim().to_ascii_lowercase()),
                    value,
                    source,
                }));
            }
            value => settings.push(Setting {
                path: section,
                value,
                source,
            }),
        }
    }
    Ok(settings)
}

fn prefixed_env_settings() -> Vec<Setting> {
    env::vars()
        .filter_map(|(key, raw)| {
            let path = key
                .strip_prefix(ENV_PREFIX)?
                .split("__")
                .filter(|segment| !segment.is_empty())
                .map(str::to_ascii_lowercase)
                .collect::<Vec<_>>()
                .join(".");
            if path.is_empty() {
                return None;
            }
            Some(Setting {
                path,
                value: env_value(&raw),
                source: PolicySource::Env,
            })
        })
        .collect()
}

/// Env values are read as JSON literals when they parse, otherwise as plain strings.
fn env_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn json_env_settings() -> Result<Vec<Setting>, PolicyError> {
    let raw = match env::var(ENV_JSON) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(Vec::new()),
    };
    let document: Value = serde_json::from_str(&raw)
        .map_err(|err| PolicyError::Invalid(format!("{}: {}", ENV_JSON, err)))?;
    section_settings(document, PolicySource::Env)
}

/// `VERIFY_ACCESSIBILITY` switches audit-on-load on for any value that is not empty or an
/// explicit falsy literal.
fn legacy_verify_setting() -> Option<Setting> {
    let raw = env::var(ENV_VERIFY_ACCESSIBILITY).ok()?;
    let enabled = !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    );
    Some(Setting {
        path: "accessibility.verify_on_load".into(),
        value: Value::Bool(enabled),
        source: PolicySource::Legacy,
    })
}
