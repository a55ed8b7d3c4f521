use std::path::Path;

use blockfall_engine::GameSession;

use crate::{command::SessionArg, logging, tui::Tui};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionArg,
}

pub(crate) fn run(arg: &PlayArg, log_file: Option<&Path>, verbose: u8) -> anyhow::Result<()> {
    let PlayArg { session } = arg;

    // the terminal UI owns stdout and stderr, so logs only go to a file
    if let Some(path) = log_file {
        logging::init_file(verbose, path)?;
    }

    let config = session.load()?;
    let session = GameSession::new(config);
    tracing::info!(seed = session.seed(), "starting game");

    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)?;

    let snapshot = app.snapshot();
    println!(
        "Score: {} ({} pieces, seed {})",
        snapshot.score,
        snapshot.merged_pieces,
        app.seed()
    );
    Ok(())
}
