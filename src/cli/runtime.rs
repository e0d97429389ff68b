use std::path::PathBuf;

use anyhow::{Context, Result};
use pagecheck_policy_center::{load_snapshot, PolicySnapshot};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub fn load_policy(path: Option<&PathBuf>) -> Result<PolicySnapshot> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("policy file {} does not exist", path.display());
        }
    }
    let snapshot = load_snapshot(path.map(|p| p.as_path()))
        .with_context(|| "Failed to resolve run policy")?;
    info!(
        rev = snapshot.rev,
        verify_on_load = snapshot.accessibility.verify_on_load,
        "Resolved run policy"
    );
    Ok(snapshot)
}
