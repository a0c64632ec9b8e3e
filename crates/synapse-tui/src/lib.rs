//! Terminal UI for interactive candidate searches.
//!
//! State lives in [`state::AppState`], every change goes through
//! [`update::update`], and [`runtime::TuiRuntime`] drives the loop and
//! executes effects. Rendering is a pure function of state.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod toast;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::{Result, bail};
use synapse_core::config::Config;

use crate::runtime::TuiRuntime;

/// Runs the chat UI until the user quits. Must be called from within a tokio
/// runtime since search requests run as background tasks.
pub async fn run_interactive(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        bail!("interactive mode requires a terminal");
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()?;
    drop(runtime);

    let mut err = stderr();
    writeln!(err, "Goodbye!")?;
    Ok(())
}
