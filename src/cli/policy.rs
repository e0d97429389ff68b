use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;

use super::context::CliContext;
use super::output::OutputFormat;

#[derive(Args, Clone, Debug)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommand,
}

#[derive(Subcommand, Clone, Debug)]
pub enum PolicyCommand {
    /// Print the resolved policy and where each value came from
    Show,
}

pub fn cmd_policy(args: PolicyArgs, ctx: &CliContext) -> Result<()> {
    match args.command {
        PolicyCommand::Show => show_policy(ctx),
    }
}

fn show_policy(ctx: &CliContext) -> Result<()> {
    let snapshot = ctx.policy();
    if ctx.output() == OutputFormat::Json {
        let payload = json!({
            "source_file": ctx.policy_path().map(|p| p.display().to_string()),
            "policy": snapshot,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Policy Revision: {}", snapshot.rev);
    if let Some(path) = ctx.policy_path() {
        println!("Policy File: {}", path.display());
    }
    println!();
    println!(
        "Accessibility: verify_on_load={}, max_reported_elements={}",
        snapshot.accessibility.verify_on_load, snapshot.accessibility.max_reported_elements
    );
    println!(
        "Accessibility: help_base_url={}",
        snapshot.accessibility.help_base_url
    );
    println!(
        "Readiness: timeout_ms={}, poll_interval_ms={}",
        snapshot.readiness.timeout_ms, snapshot.readiness.poll_interval_ms
    );

    let mut provenance: Vec<_> = snapshot.provenance.values().collect();
    provenance.sort_by(|a, b| a.path.cmp(&b.path));
    println!();
    println!("Provenance:");
    for entry in provenance {
        println!("  {:<40} {:?}", entry.path, entry.source);
    }
    Ok(())
}
