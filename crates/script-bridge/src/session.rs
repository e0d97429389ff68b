use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeError;

/// Whether the active driver backend carries a scripting bridge able to run audits.
///
/// Resolved once when a page object is built; never re-checked per call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BackendKind {
    ScriptCapable,
    NotScriptCapable,
}

impl BackendKind {
    pub fn supports_audits(&self) -> bool {
        matches!(self, BackendKind::ScriptCapable)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::ScriptCapable => "script-capable",
            BackendKind::NotScriptCapable => "not-script-capable",
        }
    }
}

/// Minimal surface the page-object layer needs from a live browser session.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Human readable backend label, e.g. `chrome` or `firefox`.
    fn backend_name(&self) -> &str;

    fn backend(&self) -> BackendKind;

    async fn navigate(&self, url: &str) -> Result<(), BridgeError>;

    /// Evaluate `expression` in the current page and return its JSON value.
    async fn evaluate_script(&self, expression: &str) -> Result<Value, BridgeError>;
}
