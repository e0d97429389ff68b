use super::commands::Commands;
use super::context::CliContext;
use super::env::CliArgs;
use super::policy::cmd_policy;
use super::report::cmd_report;
use super::rules::cmd_rules;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Report(args) => cmd_report(args, ctx).await,
        Commands::Policy(args) => cmd_policy(args, ctx),
        Commands::Rules => cmd_rules(ctx),
    }
}
