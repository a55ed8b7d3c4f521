use std::path::{Path, PathBuf};

use blockfall_engine::{EventQueue, GameSession, GameSnapshot, SessionConfig};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{command::SessionArg, logging, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    session: SessionArg,
    /// Seed for the random input sequence [default: the shape seed]
    #[arg(long)]
    input_seed: Option<u64>,
    /// Stop after this many ticks even if the game is not over
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,
    /// Random inputs sent between two ticks
    #[arg(long, default_value_t = 3)]
    inputs_per_tick: usize,
    /// Output file path for the report (JSON) [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Result of a headless game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SimulationReport {
    seed: u64,
    input_seed: u64,
    tick_interval_ms: u64,
    ticks: u64,
    events: usize,
    score: usize,
    merged_pieces: usize,
    game_over: bool,
    final_snapshot: GameSnapshot,
}

pub(crate) fn run(arg: &SimulateArg, log_file: Option<&Path>, verbose: u8) -> anyhow::Result<()> {
    let SimulateArg {
        session,
        input_seed,
        max_ticks,
        inputs_per_tick,
        output,
    } = arg;

    match log_file {
        Some(path) => logging::init_file(verbose, path)?,
        None => logging::init_stderr(verbose)?,
    }

    let config = session.load()?;
    let report = simulate(config, *input_seed, *max_ticks, *inputs_per_tick);
    tracing::info!(
        seed = report.seed,
        score = report.score,
        ticks = report.ticks,
        game_over = report.game_over,
        "simulation finished"
    );
    Output::save_json(&report, output.clone())
}

/// Plays one game, sending `inputs_per_tick` random inputs before each tick,
/// until the game is over or `max_ticks` ticks have been processed.
fn simulate(
    config: SessionConfig,
    input_seed: Option<u64>,
    max_ticks: u64,
    inputs_per_tick: usize,
) -> SimulationReport {
    let tick_interval_ms = config.tick_interval_ms;
    let mut session = GameSession::new(config);
    let seed = session.seed();
    let input_seed = input_seed.unwrap_or(seed);
    let mut rng = Pcg32::seed_from_u64(input_seed);
    let mut queue = EventQueue::new();
    let mut events = 0;

    while session.session_state().is_playing() && session.ticks() < max_ticks {
        for _ in 0..inputs_per_tick {
            queue.push_input(rng.random());
        }
        queue.push_tick();
        events += queue.pump(&mut session);
    }

    let final_snapshot = session.snapshot();
    SimulationReport {
        seed,
        input_seed,
        tick_interval_ms,
        ticks: session.ticks(),
        events,
        score: final_snapshot.score,
        merged_pieces: final_snapshot.merged_pieces,
        game_over: final_snapshot.game_over,
        final_snapshot,
    }
}
