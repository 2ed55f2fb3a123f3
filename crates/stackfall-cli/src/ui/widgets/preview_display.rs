use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use stackfall_engine::{PREVIEW_SIZE, Shape};

use crate::ui::widgets::CellDisplay;

/// Next-piece preview: the shape's offsets drawn on a fixed 4x4 area.
#[derive(Debug)]
pub struct PreviewDisplay<'a> {
    shape: Option<Shape>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PreviewDisplay<'a> {
    pub fn new() -> Self {
        Self {
            shape: None,
            block: None,
        }
    }

    pub fn shape(self, shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cell_units(PREVIEW_SIZE) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cell_units(PREVIEW_SIZE) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..PREVIEW_SIZE).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..PREVIEW_SIZE).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty = CellDisplay::empty(false);
        for (row, grid_row) in grid_rows.enumerate() {
            for (col, grid_cell) in grid_row.into_iter().enumerate() {
                match self.shape {
                    Some(shape) if shape.contains(row, col) => {
                        CellDisplay::shape(shape.kind()).render(grid_cell, buf);
                    }
                    _ => Widget::render(&empty, grid_cell, buf),
                }
            }
        }
    }
}
