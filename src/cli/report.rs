use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use axs_audit::{reports_have_errors, AuditReportBuilder, Report};
use clap::Args;
use script_bridge::{decode_audit_response, RawAuditResult};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use super::context::CliContext;
use super::output::OutputFormat;

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// Raw audit response saved from a browser run (JSON)
    pub input: PathBuf,

    /// Exit with an error when any document has audit errors
    #[arg(long)]
    pub fail_on_error: bool,
}

pub async fn cmd_report(args: ReportArgs, ctx: &CliContext) -> Result<()> {
    let raw = fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.input.display()))?;
    let documents = decode_documents(value)?;
    debug!(documents = documents.len(), "decoded raw audit documents");

    let builder = AuditReportBuilder::from_policy(&ctx.policy().accessibility);
    let reports = builder.build(&documents);

    match ctx.output() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Human => print!("{}", render_reports(&reports)),
    }

    if args.fail_on_error && reports_have_errors(&reports) {
        warn!("audit errors present");
        bail!("accessibility audit reported errors");
    }
    Ok(())
}

/// Accepts the in-page script envelope (`{status, documents}`) as well as a bare document
/// list or single document.
fn decode_documents(value: Value) -> Result<Vec<RawAuditResult>> {
    let documents = if value.get("status").is_some() {
        decode_audit_response(value)?
    } else {
        RawAuditResult::parse_documents(value)?
    };
    Ok(documents)
}

fn render_reports(reports: &[Report]) -> String {
    let mut output = String::new();
    if reports.is_empty() {
        output.push_str("No documents were audited.\n");
        return output;
    }
    for (index, report) in reports.iter().enumerate() {
        output.push_str(&format!(
            "=== Document {}: {} error(s), {} warning(s) ===\n",
            index + 1,
            report.errors.len(),
            report.warnings.len()
        ));
        for message in report.errors.iter().chain(report.warnings.iter()) {
            output.push_str(message);
            output.push_str("\n\n");
        }
    }
    output
}
