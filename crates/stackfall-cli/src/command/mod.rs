use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::logging;

use self::{play::PlayArg, print_config::PrintConfigArg};

mod engine_config;
mod play;
mod print_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Append diagnostic logs to this file
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Most verbose level written to the log file
    #[clap(long, global = true, default_value_t = Level::INFO)]
    log_level: Level,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the effective engine configuration as JSON
    PrintConfig(#[clap(flatten)] PrintConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.log_file.as_deref(), args.log_level)?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::PrintConfig(arg) => print_config::run(&arg)?,
    }
    Ok(())
}
