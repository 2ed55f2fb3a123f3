use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use stackfall_engine::{Cell, ShapeKind};

use crate::ui::widgets::style;

/// A single grid cell, two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    pub const fn shape(kind: ShapeKind) -> Self {
        Self::new(style::shape(kind), "")
    }

    /// Picks the look of a grid cell. Falling cells take the color of
    /// `falling_kind` when it is known.
    pub const fn from_cell(cell: Cell, falling_kind: Option<ShapeKind>) -> Self {
        match cell {
            Cell::Empty => Self::empty(true),
            Cell::Settled => Self::new(style::SETTLED, ""),
            Cell::Falling => match falling_kind {
                Some(kind) => Self::shape(kind),
                None => Self::new(style::FALLING, ""),
            },
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // A Paragraph fills the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
