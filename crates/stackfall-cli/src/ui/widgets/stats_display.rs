use std::{iter, time::Duration};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::BoardEngine;

use crate::ui::widgets::style;

pub struct StatsDisplay<'a> {
    engine: &'a BoardEngine,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(engine: &'a BoardEngine) -> Self {
        Self {
            engine,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cell_units(ROWS.len()) + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&BoardEngine) -> String),
    LabelValue(&'static str, &'static dyn Fn(&BoardEngine) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|engine| engine.stats().score().to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|engine| format_time(engine.stats().elapsed())),
    Row::Empty,
    Row::LabelValue("LINES:", &|engine| {
        engine.stats().cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|engine| {
        engine.stats().locked_pieces().to_string()
    }),
    Row::LabelValue("SPEED:", &|engine| {
        format!("{}ms", engine.fall_interval().as_millis())
    }),
    Row::LabelValue("NEXT:", &|engine| {
        engine
            .next_shape()
            .map_or_else(|| "-".to_owned(), |shape| shape.kind().as_char().to_string())
    }),
];

fn format_time(elapsed: Duration) -> String {
    format!(
        "{:0}:{:0>2}.{:0>2}",
        elapsed.as_secs() / 60,
        elapsed.as_secs() % 60,
        elapsed.subsec_millis() / 10
    )
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.engine), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.engine), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
