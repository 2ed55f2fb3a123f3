mod command;
mod logging;
mod score_log;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
