use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    cell_display::*, engine_display::*, grid_display::*, preview_display::*, stats_display::*,
};

mod cell_display;
mod engine_display;
mod grid_display;
mod preview_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(63, 63, 63);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};
    use stackfall_engine::ShapeKind;

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HELP: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const SETTLED: Style = bg_only(color::GRAY);
    /// Falling cells whose shape kind is unknown.
    pub const FALLING: Style = bg_only(color::WHITE);

    pub const fn shape(kind: ShapeKind) -> Style {
        match kind {
            ShapeKind::I => bg_only(color::CYAN),
            ShapeKind::O => bg_only(color::YELLOW),
            ShapeKind::S => bg_only(color::GREEN),
            ShapeKind::Z => bg_only(color::RED),
            ShapeKind::J => bg_only(color::BLUE),
            ShapeKind::L => bg_only(color::ORANGE),
            ShapeKind::T => bg_only(color::MAGENTA),
        }
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

/// Converts a cell count into terminal units, saturating on overflow.
fn cell_units(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}
