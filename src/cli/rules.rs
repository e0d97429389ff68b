use anyhow::Result;
use axs_audit::BUILTIN_RULES;
use script_bridge::RawSeverity;
use serde_json::json;

use super::context::CliContext;
use super::output::OutputFormat;

pub fn cmd_rules(ctx: &CliContext) -> Result<()> {
    if ctx.output() == OutputFormat::Json {
        let rules: Vec<_> = BUILTIN_RULES
            .iter()
            .map(|rule| {
                json!({
                    "name": rule.name,
                    "code": rule.code,
                    "description": rule.description,
                    "severity": rule.severity,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    for rule in BUILTIN_RULES {
        let severity = match rule.severity {
            RawSeverity::Error => "error",
            RawSeverity::Warning => "warning",
        };
        println!(
            "{:<12} {:<44} {:<8} {}",
            rule.code, rule.name, severity, rule.description
        );
    }
    Ok(())
}
