use blockfall_engine::SessionView;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{CellDisplay, framed_size, to_u16};

/// The board grid with the falling piece drawn over it.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    view: SessionView<'a>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(view: SessionView<'a>) -> Self {
        Self { view, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Outer size in terminal cells, border included.
    pub fn size(&self) -> (u16, u16) {
        let board = self.view.board();
        framed_size(
            self.block.as_ref(),
            to_u16(board.width()).saturating_mul(CellDisplay::WIDTH),
            to_u16(board.height()).saturating_mul(CellDisplay::HEIGHT),
        )
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        for (y, row) in self.view.rows().enumerate() {
            let top = area.y.saturating_add(to_u16(y).saturating_mul(CellDisplay::HEIGHT));
            if top >= area.bottom() {
                break;
            }
            for (x, cell) in row.enumerate() {
                let left = area.x.saturating_add(to_u16(x).saturating_mul(CellDisplay::WIDTH));
                let cell_area = Rect::new(left, top, CellDisplay::WIDTH, CellDisplay::HEIGHT)
                    .intersection(area);
                if cell_area.is_empty() {
                    break;
                }
                CellDisplay::from_cell(cell).render(cell_area, buf);
            }
        }
    }
}
