//! Readiness state machine and the load wait built on it

use std::time::Duration;

use async_trait::async_trait;
use axs_audit::Report;
use pagecheck_policy_center::{AccessibilityPolicy, LoadVerdict, ReadinessPolicy};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::errors::PageError;

/// Lifecycle of one page visit.
///
/// `NotStarted -> Loading` when a wait begins, `Loading -> Ready` once the load predicate
/// holds, `Loading -> Failed` on timeout or driver failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessState {
    NotStarted,
    Loading,
    Ready,
    Failed,
}

impl ReadinessState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReadinessState::Ready | ReadinessState::Failed)
    }
}

impl Default for ReadinessState {
    fn default() -> Self {
        ReadinessState::NotStarted
    }
}

/// The "is this page loaded" predicate.
#[async_trait]
pub trait LoadProbe: Send + Sync {
    async fn is_loaded(&self) -> Result<bool, PageError>;
}

/// Runs the audit pipeline once a page is ready.
#[async_trait]
pub trait LoadAuditor: Send + Sync {
    /// `None` when no rules are selected.
    async fn audit_loaded_page(&self) -> Result<Option<Vec<Report>>, PageError>;
}

/// Drives the cooperative poll that takes a page from loading to ready.
#[derive(Debug, Clone)]
pub struct ReadinessController {
    state: ReadinessState,
    timeout: Duration,
    poll_interval: Duration,
    accessibility: AccessibilityPolicy,
}

impl ReadinessController {
    pub fn new(readiness: &ReadinessPolicy, accessibility: AccessibilityPolicy) -> Self {
        Self {
            state: ReadinessState::NotStarted,
            timeout: readiness.timeout(),
            poll_interval: readiness.poll_interval(),
            accessibility,
        }
    }

    pub fn state(&self) -> ReadinessState {
        self.state
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Mark the start of a load, e.g. right before navigation.
    pub fn begin_loading(&mut self) {
        self.state = ReadinessState::Loading;
    }

    /// Mark the load as failed outside the wait itself (navigation errors).
    pub fn fail(&mut self) {
        self.state = ReadinessState::Failed;
    }

    /// Poll `target` until it reports loaded, then run the audit-on-load step if the policy
    /// asks for it.
    ///
    /// The timeout covers the polling only. The audit never starts before the predicate
    /// has first returned true.
    pub async fn wait_for_page<T>(&mut self, label: &str, target: &T) -> Result<(), PageError>
    where
        T: LoadProbe + LoadAuditor,
    {
        self.begin_loading();
        debug!(
            page = label,
            timeout_ms = self.timeout.as_millis() as u64,
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "waiting for page readiness"
        );

        match timeout(self.timeout, poll_until_loaded(target, self.poll_interval)).await {
            Ok(Ok(())) => {
                self.state = ReadinessState::Ready;
                info!(page = label, "page ready");
            }
            Ok(Err(err)) => {
                self.state = ReadinessState::Failed;
                warn!(page = label, "readiness check failed: {}", err);
                return Err(err);
            }
            Err(_) => {
                self.state = ReadinessState::Failed;
                let waited_ms = self.timeout.as_millis() as u64;
                warn!(page = label, waited_ms, "page never became ready");
                return Err(PageError::Timeout {
                    url: label.to_string(),
                    waited_ms,
                });
            }
        }

        if !self.accessibility.audit_on_load() {
            return Ok(());
        }

        let reports = target.audit_loaded_page().await?.unwrap_or_default();
        let error_count: usize = reports.iter().map(|report| report.errors.len()).sum();
        match self.accessibility.load_verdict(error_count) {
            LoadVerdict::Violation { error_count } => {
                warn!(page = label, error_count, "accessibility audit failed on load");
                Err(PageError::AccessibilityViolation {
                    error_count,
                    message: violation_message(&reports),
                })
            }
            LoadVerdict::Clean | LoadVerdict::NotEngaged => Ok(()),
        }
    }
}

async fn poll_until_loaded<P>(probe: &P, interval: Duration) -> Result<(), PageError>
where
    P: LoadProbe + ?Sized,
{
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        if probe.is_loaded().await? {
            debug!(attempts, "load predicate satisfied");
            return Ok(());
        }
        sleep(interval).await;
    }
}

fn violation_message(reports: &[Report]) -> String {
    reports
        .iter()
        .flat_map(|report| report.errors.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecheck_policy_center::default_snapshot;

    #[test]
    fn controller_starts_not_started() {
        let snapshot = default_snapshot();
        let controller =
            ReadinessController::new(&snapshot.readiness, snapshot.accessibility.clone());
        assert_eq!(controller.state(), ReadinessState::NotStarted);
        assert_eq!(controller.timeout(), Duration::from_secs(30));
        assert_eq!(controller.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn terminal_states() {
        assert!(ReadinessState::Ready.is_terminal());
        assert!(ReadinessState::Failed.is_terminal());
        assert!(!ReadinessState::Loading.is_terminal());
        assert_eq!(ReadinessState::default(), ReadinessState::NotStarted);
    }

    #[test]
    fn violation_message_joins_errors_across_documents() {
        let reports = vec![
            Report {
                errors: vec!["Error: A".into()],
                warnings: vec!["Warning: W".into()],
            },
            Report {
                errors: vec!["Error: B".into()],
                warnings: Vec::new(),
            },
        ];
        assert_eq!(violation_message(&reports), "Error: A\n\nError: B");
    }
}
