//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use synapse_core::config;
use tracing_appender::non_blocking::WorkerGuard;

mod commands;

#[derive(Parser)]
#[command(name = "synapse")]
#[command(version = "1.0")]
#[command(about = "Recruiter assistant chat in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Seed for the canned search replies (overrides config)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Simulated search latency in milliseconds (overrides config)
    #[arg(long = "mock-latency-ms", value_name = "MS")]
    mock_latency_ms: Option<u64>,

    /// Make every search request fail, for demoing error handling
    #[arg(long)]
    fail: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let Cli {
        command,
        seed,
        mock_latency_ms,
        fail,
    } = Cli::parse();

    // Subcommands are plain one-shot printers; only the default chat mode
    // needs logging and a runtime.
    match command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        None => {
            let _log_guard = init_logging()?;

            let mut config = config::Config::load().context("load config")?;
            if let Some(seed) = seed {
                config.mock.seed = seed;
            }
            if let Some(latency_ms) = mock_latency_ms {
                config.mock.latency_ms = latency_ms;
            }
            if fail {
                config.mock.fail = true;
            }

            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(async move { commands::chat::run(&config).await })
        }
    }
}

/// File logging only. The TUI owns the terminal, so nothing may write to
/// stdout or stderr while it runs.
fn init_logging() -> Result<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let log_dir = config::paths::log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("create log directory at {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(&log_dir, "synapse.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = tracing_subscriber::EnvFilter::try_from_env("SYNAPSE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(guard)
}
