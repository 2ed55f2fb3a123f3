use std::path::PathBuf;

use stackfall_engine::BoardEngine;
use tracing::info;

use crate::{
    command::{engine_config::EngineConfigArg, play::app::PlayApp},
    score_log::ScoreLog,
    tui::Tui,
};

mod app;
mod input;

const DEFAULT_SCORE_FILE: &str = "text.txt";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    config: EngineConfigArg,
    /// File that finished games are appended to
    #[clap(long, default_value = DEFAULT_SCORE_FILE)]
    score_file: PathBuf,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: EngineConfigArg::default(),
            score_file: PathBuf::from(DEFAULT_SCORE_FILE),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config, score_file } = arg;

    let config = config.load()?;
    let engine = BoardEngine::new(&config)?;
    let score_log = ScoreLog::open(score_file)?;
    info!(
        width = config.width,
        height = config.height,
        score_file = %score_log.path().display(),
        "starting play"
    );

    let mut app = PlayApp::new(engine, score_log);
    Tui::new().run(&mut app)?;

    if let Some(e) = app.into_save_error() {
        return Err(e.context("Failed to save score"));
    }
    Ok(())
}
