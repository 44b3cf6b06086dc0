use anyhow::Context as _;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Enables tracing output to stderr, filtered by `VHDMAKER_LOG` (default `info`).
pub fn enable_tracing() -> anyhow::Result<()> {
    let filter = if let Ok(filter) = std::env::var("VHDMAKER_LOG") {
        EnvFilter::try_new(filter).context("invalid VHDMAKER_LOG")?
    } else {
        EnvFilter::default().add_directive(tracing::metadata::LevelFilter::INFO.into())
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .context("failed to enable tracing")?;

    Ok(())
}
