use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;

/// Installs a plain-text subscriber that appends to `log_file`.
///
/// The terminal belongs to the game screen, so nothing is logged when no
/// file is given.
pub fn init(log_file: Option<&Path>, max_level: Level) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install log subscriber")?;
    Ok(())
}
