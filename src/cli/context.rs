use std::path::PathBuf;

use pagecheck_policy_center::PolicySnapshot;

use super::output::OutputFormat;

pub struct CliContext {
    policy: PolicySnapshot,
    policy_path: Option<PathBuf>,
    output: OutputFormat,
}

impl CliContext {
    pub fn new(policy: PolicySnapshot, policy_path: Option<PathBuf>, output: OutputFormat) -> Self {
        Self {
            policy,
            policy_path,
            output,
        }
    }

    pub fn policy(&self) -> &PolicySnapshot {
        &self.policy
    }

    pub fn policy_path(&self) -> Option<&PathBuf> {
        self.policy_path.as_ref()
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }
}
