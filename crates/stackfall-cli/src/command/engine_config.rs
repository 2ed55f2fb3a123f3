use std::{fs, path::PathBuf};

use anyhow::Context as _;
use stackfall_engine::{EngineConfig, PieceSeed};

/// Engine settings shared by every subcommand.
///
/// Flags override the values read from `--config`.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EngineConfigArg {
    /// Engine configuration file (JSON format)
    #[clap(long)]
    config: Option<PathBuf>,
    /// Number of grid columns
    #[clap(long)]
    width: Option<usize>,
    /// Number of grid rows
    #[clap(long)]
    height: Option<usize>,
    /// Piece seed as 32 hex digits, for a reproducible game
    #[clap(long)]
    seed: Option<PieceSeed>,
}

impl EngineConfigArg {
    pub(crate) fn load(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to open config file: {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))?
            }
            None => EngineConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.validate().context("Invalid engine configuration")?;
        Ok(config)
    }
}
