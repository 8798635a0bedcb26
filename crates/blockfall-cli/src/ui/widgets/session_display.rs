use blockfall_engine::SessionView;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::Text,
    widgets::{Block, Clear, Widget},
};

use crate::ui::{
    KEY_BINDINGS,
    widgets::{BoardDisplay, KeyBindingDisplay, StatsDisplay, theme},
};

/// Board in the middle, statistics and key help to its left.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    view: SessionView<'a>,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(view: SessionView<'a>) -> Self {
        Self { view }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.view.state();
        let board = BoardDisplay::new(self.view).block(
            Block::bordered()
                .border_style(theme::border_color(state))
                .style(theme::TEXT),
        );
        let stats = StatsDisplay::new(self.view.stats()).block(theme::panel("STATS", state));
        let keys = KeyBindingDisplay::new(KEY_BINDINGS).block(theme::panel("KEYS", state));

        let (board_width, board_height) = board.size();
        let (stats_width, stats_height) = stats.size();
        let (keys_width, keys_height) = keys.size();

        let [side_column, board_column] = Layout::horizontal([
            Constraint::Length(stats_width.max(keys_width)),
            Constraint::Length(board_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [stats_area, keys_area] = Layout::vertical([
            Constraint::Length(stats_height),
            Constraint::Length(keys_height),
        ])
        .spacing(1)
        .areas(side_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board_height)]).areas(board_column);

        stats.render(stats_area, buf);
        keys.render(keys_area, buf);
        board.render(board_area, buf);

        if state.is_game_over() {
            let popup = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            Clear.render(popup, buf);
            Block::new().style(theme::GAME_OVER).render(popup, buf);
            Text::styled("GAME OVER", theme::GAME_OVER)
                .centered()
                .render(popup.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
