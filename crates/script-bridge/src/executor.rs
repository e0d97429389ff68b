use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BridgeError, BridgeErrorKind};
use crate::model::{AuditOutcome, AuditRequest, RawAuditResult};
use crate::script::{build_audit_script, STATUS_AXS_UNAVAILABLE, STATUS_OK};
use crate::session::{BackendKind, BrowserSession};

/// Runs an accessibility audit inside the current page.
///
/// A backend without scripting support answers with [`AuditOutcome::Unsupported`] instead of
/// an error so the caller can turn the capability gap into its own failure.
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    async fn run_audit(&self, request: &AuditRequest) -> Result<AuditOutcome, BridgeError>;
}

/// Executor that evaluates the audit script through a [`BrowserSession`].
///
/// The session's backend kind is read once, here; later calls never re-query it.
pub struct SessionScriptExecutor {
    session: Arc<dyn BrowserSession>,
    backend: BackendKind,
    backend_name: String,
}

impl SessionScriptExecutor {
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        let backend = session.backend();
        let backend_name = session.backend_name().to_string();
        Self {
            session,
            backend,
            backend_name,
        }
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }
}

/// Decode the value returned by the in-page audit script.
///
/// The main document is always audited, so an `ok` envelope without at least one document is
/// malformed.
pub fn decode_audit_response(response: Value) -> Result<Vec<RawAuditResult>, BridgeError> {
    match response.get("status").and_then(|v| v.as_str()) {
        Some(STATUS_OK) => {
            let documents = match response.get("documents") {
                None | Some(Value::Null) => {
                    return Err(BridgeError::malformed("audit response has no documents"));
                }
                Some(documents) => RawAuditResult::parse_documents(documents.clone())?,
            };
            if documents.is_empty() {
                return Err(BridgeError::malformed("audit response lists zero documents"));
            }
            Ok(documents)
        }
        Some(STATUS_AXS_UNAVAILABLE) => Err(BridgeError::new(BridgeErrorKind::ScriptFailed)
            .with_hint("axs audit library is not loaded in the page")),
        Some(other) => Err(BridgeError::malformed(format!(
            "unexpected audit status: {other}"
        ))),
        None => Err(BridgeError::malformed("audit response has no status")),
    }
}

#[async_trait]
impl ScriptExecutor for SessionScriptExecutor {
    async fn run_audit(&self, request: &AuditRequest) -> Result<AuditOutcome, BridgeError> {
        if !self.backend.supports_audits() {
            debug!(backend = %self.backend_name, "backend cannot run script audits");
            return Ok(AuditOutcome::Unsupported {
                backend: self.backend_name.clone(),
            });
        }

        let script = build_audit_script(request)?;
        let response = self.session.evaluate_script(&script).await.map_err(|err| {
            warn!("audit script evaluation failed: {}", err);
            err
        })?;
        let documents = decode_audit_response(response)?;
        debug!(
            documents = documents.len(),
            rules = request.rules.len(),
            "audit script completed"
        );
        Ok(AuditOutcome::Completed(documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_reads_documents() {
        let docs = decode_audit_response(json!({
            "status": "ok",
            "documents": [{ "results": [] }]
        }))
        .unwrap();
        assert_eq!(docs, vec![RawAuditResult::default()]);
    }

    #[test]
    fn decode_reports_missing_library() {
        let err = decode_audit_response(json!({ "status": "axs_unavailable" }))
            .unwrap_err();
        assert_eq!(err.kind, BridgeErrorKind::ScriptFailed);
    }

    #[test]
    fn decode_rejects_ok_without_documents() {
        for response in [
            json!({ "status": "ok" }),
            json!({ "status": "ok", "documents": null }),
            json!({ "status": "ok", "documents": [] }),
        ] {
            let err = decode_audit_response(response).unwrap_err();
            assert_eq!(err.kind, BridgeErrorKind::MalformedResponse);
        }
    }

    #[test]
    fn decode_rejects_statusless_payload() {
        let err = decode_audit_response(json!([])).unwrap_err();
        assert_eq!(err.kind, BridgeErrorKind::MalformedResponse);
    }
}
