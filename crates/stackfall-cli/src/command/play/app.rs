use chrono::Local;
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};
use stackfall_engine::{BoardEngine, DropOutcome, GamePhase, GameSummary};
use tracing::{debug, error};

use crate::{
    command::play::input::Command,
    score_log::ScoreLog,
    tui::{App, Tui},
    ui::widgets::{EngineDisplay, style},
};

/// Terminal host around a [`BoardEngine`].
///
/// Keeps no game state of its own: keys become engine calls, ticks follow
/// the engine's fall interval and finished games go to the score log.
#[derive(Debug)]
pub(crate) struct PlayApp {
    engine: BoardEngine,
    score_log: ScoreLog,
    is_exiting: bool,
    save_error: Option<anyhow::Error>,
}

impl PlayApp {
    pub(crate) fn new(engine: BoardEngine, score_log: ScoreLog) -> Self {
        Self {
            engine,
            score_log,
            is_exiting: false,
            save_error: None,
        }
    }

    /// Returns the first score log failure seen while playing.
    pub(crate) fn into_save_error(self) -> Option<anyhow::Error> {
        self.save_error
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Rotate => _ = self.engine.try_rotate(),
            Command::MoveLeft => _ = self.engine.move_left(),
            Command::MoveRight => _ = self.engine.move_right(),
            Command::SoftDrop => {
                let outcome = self.engine.soft_drop();
                self.log_outcome(outcome);
            }
            Command::HardDrop => {
                let outcome = self.engine.hard_drop();
                self.log_outcome(outcome);
            }
            Command::TogglePause => self.engine.toggle_pause(),
            Command::Start => _ = self.engine.start(),
            Command::Restart => {
                let summary = self.engine.restart();
                self.save(summary);
            }
            Command::Quit => {
                if self.engine.phase().is_game_over() {
                    let summary = self.engine.reset();
                    self.save(summary);
                }
                self.is_exiting = true;
            }
        }
    }

    fn log_outcome(&self, outcome: DropOutcome) {
        if let DropOutcome::Locked { cleared_lines } = outcome
            && cleared_lines > 0
        {
            debug!(cleared_lines, score = self.engine.stats().score(), "lines cleared");
        }
    }

    fn save(&mut self, summary: Option<GameSummary>) {
        let Some(summary) = summary else {
            return;
        };
        if let Err(e) = self.score_log.append(&summary, Local::now()) {
            error!("{e:#}");
            self.save_error.get_or_insert(e);
        }
    }

    /// Ticks only while a game is running, at the engine's current speed.
    fn sync_tick_interval(&self, tui: &mut Tui) {
        let interval = self
            .engine
            .phase()
            .is_running()
            .then(|| self.engine.fall_interval());
        if tui.tick_interval() != interval {
            debug!(?interval, "tick interval changed");
            tui.set_tick_interval(interval);
        }
    }

    fn help_text(&self) -> &'static str {
        match self.engine.phase() {
            GamePhase::NotStarted => "Controls: S (Start) | Q (Quit)",
            GamePhase::Running => {
                "Controls: ← → (Move) | ↑ (Rotate) | ↓ (Soft Drop) | Space (Hard Drop) | P (Pause) | R (Restart) | Q (Quit)"
            }
            GamePhase::Paused => "Controls: P (Resume) | R (Restart) | Q (Quit)",
            GamePhase::GameOver => "Controls: R (Restart) | Q (Quit)",
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_tick_interval(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Some(command) = event.as_key_event().and_then(Command::from_key) {
            if command.is_quit() {
                debug!(phase = ?self.engine.phase(), "quit requested");
            }
            self.apply(command);
            self.sync_tick_interval(tui);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let help_text = Text::from(self.help_text()).style(style::HELP).centered();
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(EngineDisplay::new(&self.engine), main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        let outcome = self.engine.tick();
        self.log_outcome(outcome);
        self.sync_tick_interval(tui);
    }
}
