use std::io::{self, Write as _};

use anyhow::Context as _;

use crate::command::engine_config::EngineConfigArg;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PrintConfigArg {
    #[clap(flatten)]
    config: EngineConfigArg,
}

pub(crate) fn run(arg: &PrintConfigArg) -> anyhow::Result<()> {
    let config = arg.config.load()?;
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    writeln!(io::stdout(), "{json}").context("Failed to write config")?;
    Ok(())
}
