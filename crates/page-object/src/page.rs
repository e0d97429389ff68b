//! Page object orchestration

use std::sync::Arc;

use async_trait::async_trait;
use axs_audit::{AuditReportBuilder, AuditRuleSelector, Report};
use pagecheck_policy_center::PolicyView;
use script_bridge::{
    AuditOutcome, AuditRequest, BrowserSession, ScriptExecutor, SessionScriptExecutor,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::PageError;
use crate::readiness::{LoadAuditor, LoadProbe, ReadinessController, ReadinessState};

/// What a concrete page declares about itself.
///
/// Rule and scope selection come from [`AuditRuleSelector`]; by default a page audits
/// nothing.
#[async_trait]
pub trait PageDefinition: AuditRuleSelector {
    /// Address to navigate to. Pages only reachable through interaction return `None`.
    fn url(&self) -> Option<String>;

    /// Load-completion predicate, polled until it returns `true`.
    async fn is_browser_on_page(&self, session: &dyn BrowserSession) -> Result<bool, PageError>;
}

/// Audit capability of the session a page object was built on.
#[derive(Clone)]
pub enum AuditBackend {
    ScriptCapable(Arc<dyn ScriptExecutor>),
    NotScriptCapable { backend: String },
}

struct PageContext<P> {
    definition: P,
    session: Arc<dyn BrowserSession>,
    audit: AuditBackend,
    builder: AuditReportBuilder,
}

/// A page under test bound to one browser session.
pub struct PageObject<P> {
    readiness: ReadinessController,
    context: PageContext<P>,
}

impl<P: PageDefinition> PageObject<P> {
    /// Build a page object that audits through the session's own script channel.
    pub fn new(definition: P, session: Arc<dyn BrowserSession>, policy: &PolicyView) -> Self {
        let executor: Arc<dyn ScriptExecutor> =
            Arc::new(SessionScriptExecutor::new(Arc::clone(&session)));
        Self::with_executor(definition, session, executor, policy)
    }

    /// Build a page object with an explicit audit executor.
    ///
    /// Audit capability is still taken from `session.backend()`, once, here.
    pub fn with_executor(
        definition: P,
        session: Arc<dyn BrowserSession>,
        executor: Arc<dyn ScriptExecutor>,
        policy: &PolicyView,
    ) -> Self {
        let audit = if session.backend().supports_audits() {
            AuditBackend::ScriptCapable(executor)
        } else {
            AuditBackend::NotScriptCapable {
                backend: session.backend_name().to_string(),
            }
        };
        Self {
            readiness: ReadinessController::new(&policy.readiness, policy.accessibility.clone()),
            context: PageContext {
                definition,
                session,
                audit,
                builder: AuditReportBuilder::from_policy(&policy.accessibility),
            },
        }
    }

    pub fn definition(&self) -> &P {
        &self.context.definition
    }

    pub fn state(&self) -> ReadinessState {
        self.readiness.state()
    }

    pub fn url(&self) -> Option<String> {
        self.context.definition.url()
    }

    /// Navigate to the page and wait until it is ready.
    pub async fn visit(&mut self) -> Result<&mut Self, PageError> {
        let url = self.context.definition.url().ok_or(PageError::NotVisitable)?;
        let visit_id = Uuid::new_v4();
        info!(visit_id = %visit_id, url = %url, "visiting page");

        self.readiness.begin_loading();
        if let Err(err) = self.context.session.navigate(&url).await {
            self.readiness.fail();
            return Err(err.into());
        }

        self.readiness.wait_for_page(&url, &self.context).await?;
        info!(visit_id = %visit_id, url = %url, "visit complete");
        Ok(self)
    }

    /// Wait for a page that was reached without `visit`, e.g. after a click.
    pub async fn wait_for_page(&mut self) -> Result<(), PageError> {
        let label = self
            .context
            .definition
            .url()
            .unwrap_or_else(|| "<current page>".to_string());
        self.readiness.wait_for_page(&label, &self.context).await
    }

    /// Audit the current DOM.
    ///
    /// Fails with [`PageError::UnsupportedBackend`] on sessions without scripting, before
    /// any script runs. Returns `None` when the page selects no rules.
    pub async fn do_axs_audit(&self) -> Result<Option<Vec<Report>>, PageError> {
        self.context.do_axs_audit().await
    }
}

impl<P: PageDefinition> PageContext<P> {
    async fn do_axs_audit(&self) -> Result<Option<Vec<Report>>, PageError> {
        let rules = self.definition.rules();
        let scope = self.definition.scope();

        let executor = match &self.audit {
            AuditBackend::ScriptCapable(executor) => executor,
            AuditBackend::NotScriptCapable { backend } => {
                return Err(PageError::UnsupportedBackend {
                    backend: backend.clone(),
                });
            }
        };

        let Some(rule_names) = rules.request_rules() else {
            debug!("no audit rules selected; skipping audit");
            return Ok(None);
        };

        let request = AuditRequest {
            rules: rule_names,
            scope: scope.as_selector().map(str::to_string),
        };
        debug!(rules = ?request.rules, scope = ?request.scope, "running accessibility audit");

        match executor.run_audit(&request).await? {
            AuditOutcome::Completed(raw) => {
                let reports = self.builder.build(&raw);
                info!(
                    documents = reports.len(),
                    errors = reports.iter().map(|r| r.errors.len()).sum::<usize>(),
                    warnings = reports.iter().map(|r| r.warnings.len()).sum::<usize>(),
                    "accessibility audit finished"
                );
                Ok(Some(reports))
            }
            AuditOutcome::Unsupported { backend } => Err(PageError::UnsupportedBackend { backend }),
        }
    }
}

#[async_trait]
impl<P: PageDefinition> LoadProbe for PageContext<P> {
    async fn is_loaded(&self) -> Result<bool, PageError> {
        self.definition
            .is_browser_on_page(self.session.as_ref())
            .await
    }
}

#[async_trait]
impl<P: PageDefinition> LoadAuditor for PageContext<P> {
    async fn audit_loaded_page(&self) -> Result<Option<Vec<Report>>, PageError> {
        self.do_axs_audit().await
    }
}
