use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// High-level error categories surfaced by the browser session layer.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum BridgeErrorKind {
    #[error("navigation failed")]
    Navigation,
    #[error("script evaluation failed")]
    ScriptFailed,
    #[error("malformed audit response")]
    MalformedResponse,
    #[error("session closed")]
    SessionClosed,
    #[error("internal error")]
    Internal,
}

/// Error metadata passed back to the page-object layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgeError {
    pub kind: BridgeErrorKind,
    pub hint: Option<String>,
    pub retriable: bool,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(hint) = &self.hint {
            write!(f, ": {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for BridgeError {}

impl BridgeError {
    pub fn new(kind: BridgeErrorKind) -> Self {
        Self {
            kind,
            hint: None,
            retriable: false,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn retriable(mut self, flag: bool) -> Self {
        self.retriable = flag;
        self
    }

    pub fn malformed(hint: impl Into<String>) -> Self {
        Self::new(BridgeErrorKind::MalformedResponse).with_hint(hint)
    }
}
