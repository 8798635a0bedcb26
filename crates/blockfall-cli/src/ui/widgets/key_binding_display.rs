use std::iter;

use blockfall_engine::Action;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::{framed_size, theme, to_u16};

/// Keys that trigger one action.
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub keys: &'static [&'static str],
    pub action: Action,
}

impl KeyBinding {
    fn label(self) -> &'static str {
        match self.action {
            Action::MoveLeft => "Left",
            Action::MoveRight => "Right",
            Action::SoftDrop => "Drop",
            Action::Rotate => "Rotate",
            Action::Quit => "Quit",
        }
    }

    fn keys_line(self) -> Line<'static> {
        let mut spans = vec![];
        for (i, key) in self.keys.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled("/", theme::DIM));
            }
            spans.push(Span::styled(key, theme::KEY));
        }
        Line::from(spans).left_aligned()
    }
}

/// One row per binding: keys on the left, action on the right.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding]) -> Self {
        Self {
            bindings,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn size(&self) -> (u16, u16) {
        framed_size(self.block.as_ref(), 18, to_u16(self.bindings.len()))
    }
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows =
            Layout::vertical(self.bindings.iter().map(|_| Constraint::Length(1))).split(area);
        for (binding, row) in iter::zip(self.bindings.iter().copied(), rows.iter().copied()) {
            binding.keys_line().render(row, buf);
            Line::from(Span::styled(binding.label(), theme::TEXT))
                .right_aligned()
                .render(row, buf);
        }
    }
}
