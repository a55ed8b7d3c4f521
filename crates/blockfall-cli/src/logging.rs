use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Maps `-v` repetitions to a level: warnings by default, then INFO, DEBUG
/// and TRACE.
pub fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init_stderr(verbose: u8) -> anyhow::Result<()> {
    let level = level_filter(verbose);
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(level)
        .try_init()
        .context("Failed to initialize logging")?;
    tracing::debug!(%level, "logging to stderr");
    Ok(())
}

/// Sends logs to `path`, truncating it. Used while the terminal UI owns the
/// screen.
pub fn init_file(verbose: u8, path: &Path) -> anyhow::Result<()> {
    let level = level_filter(verbose);
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(level)
        .try_init()
        .context("Failed to initialize logging")?;
    tracing::info!(%level, path = %path.display(), "logging to file");
    Ok(())
}
