use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use stackfall_engine::{BoardEngine, GamePhase};

use crate::ui::widgets::{GridDisplay, PreviewDisplay, StatsDisplay, color, style};

/// Whole game screen: stats on the left, the grid in the middle and the
/// next-piece preview on the right.
#[derive(Debug)]
pub struct EngineDisplay<'a> {
    engine: &'a BoardEngine,
}

impl<'a> EngineDisplay<'a> {
    pub fn new(engine: &'a BoardEngine) -> Self {
        Self { engine }
    }
}

impl Widget for EngineDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &EngineDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let phase = self.engine.phase();
        let block_padding = Padding::symmetric(1, 0);
        let border_style = border_color(phase);
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_grid = {
            let widget = GridDisplay::new(self.engine.grid())
                .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
            match self.engine.falling_piece() {
                Some(piece) => widget.falling_kind(piece.shape().kind()),
                None => widget,
            }
        };
        let preview = {
            let widget = PreviewDisplay::new().block(panel("NEXT"));
            match self.engine.next_shape() {
                Some(shape) => widget.shape(shape),
                None => widget,
            }
        };
        let stats = StatsDisplay::new(self.engine).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_grid.width()),
            Constraint::Length(preview.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [grid_area] =
            Layout::vertical([Constraint::Length(game_grid.height())]).areas(center_column);
        let [preview_area] =
            Layout::vertical([Constraint::Length(preview.height())]).areas(right_column);

        let grid_width = game_grid.width();
        stats.render(stats_area, buf);
        game_grid.render(grid_area, buf);
        preview.render(preview_area, buf);

        let popup = match phase {
            GamePhase::Running => None,
            GamePhase::NotStarted => Some((
                "PRESS S TO START",
                Style::new().fg(color::BLACK).bg(color::GREEN),
            )),
            GamePhase::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
            GamePhase::GameOver => Some((
                "GAME OVER!!",
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = grid_area.centered(Constraint::Length(grid_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

fn border_color(phase: GamePhase) -> Color {
    match phase {
        GamePhase::NotStarted => color::GREEN,
        GamePhase::Running => color::WHITE,
        GamePhase::Paused => color::YELLOW,
        GamePhase::GameOver => color::RED,
    }
}
