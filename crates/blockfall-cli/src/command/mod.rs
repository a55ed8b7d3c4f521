use std::path::{Path, PathBuf};

use anyhow::Context as _;
use blockfall_engine::SessionConfig;
use clap::{Parser, Subcommand};

use crate::util;

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Run a headless game with random input and print a JSON report
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Options shared by every mode that runs a game session.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Session settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Milliseconds between gravity ticks [default: 1000]
    #[arg(long)]
    tick_interval_ms: Option<u64>,
    /// Seed for the shape generator
    #[arg(long)]
    seed: Option<u64>,
}

impl SessionArg {
    /// Reads the settings file, if any, and applies command-line overrides.
    pub(crate) fn load(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => read_session_config(path)?,
            None => SessionConfig::default(),
        };
        if let Some(tick_interval_ms) = self.tick_interval_ms {
            config.tick_interval_ms = tick_interval_ms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate().context("Invalid session settings")?;
        Ok(config)
    }
}

fn read_session_config(path: &Path) -> anyhow::Result<SessionConfig> {
    util::read_json_file("session config", path)
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let CommandArgs {
        log_file,
        verbose,
        mode,
    } = args;
    match mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, log_file.as_deref(), verbose)?,
        Mode::Simulate(arg) => simulate::run(&arg, log_file.as_deref(), verbose)?,
    }
    Ok(())
}
