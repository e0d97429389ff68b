use clap::Subcommand;

use super::policy::PolicyArgs;
use super::report::ReportArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Render reports from a saved raw audit response
    Report(ReportArgs),

    /// Inspect the resolved run policy
    Policy(PolicyArgs),

    /// List the builtin audit rules
    Rules,
}
