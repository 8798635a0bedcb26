use blockfall_engine::Cell;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::theme;

/// One board cell, two terminal columns wide.
#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const fn from_cell(cell: Cell) -> Self {
        let (style, symbol) = match cell {
            Cell::Empty => (theme::DIM, "."),
            Cell::Locked => (theme::LOCKED, ""),
            Cell::Falling(kind) => (theme::solid(theme::piece_color(kind)), ""),
        };
        Self { style, symbol }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // The paragraph paints the whole area, not just the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
