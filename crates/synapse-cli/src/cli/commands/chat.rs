//! Chat command handler, the default mode.

use anyhow::{Context, Result};
use synapse_core::config;

pub async fn run(config: &config::Config) -> Result<()> {
    tracing::info!(
        seed = config.mock.seed,
        latency_ms = config.mock.latency_ms,
        "starting interactive session"
    );
    synapse_tui::run_interactive(config)
        .await
        .context("interactive session failed")
}
