//! Driver-facing contracts for PageCheck.
//!
//! The browser driver itself lives outside this workspace. Upper layers only need two things
//! from it: a way to tell whether the active backend can run script-based audits, and a raw
//! script channel that returns the JSON audit result for every open document. This crate
//! defines both, plus the wire model and the script that asks the page to audit itself.

pub mod error;
pub mod executor;
pub mod model;
pub mod script;
pub mod session;

pub use error::{BridgeError, BridgeErrorKind};
pub use executor::{decode_audit_response, ScriptExecutor, SessionScriptExecutor};
pub use model::{AuditOutcome, AuditRequest, RawAuditResult, RawRuleResult, RawSeverity};
pub use script::build_audit_script;
pub use session::{BackendKind, BrowserSession};
