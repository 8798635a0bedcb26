use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    board_display::*, cell_display::*, key_binding_display::*, session_display::*,
    stats_display::*,
};

mod board_display;
mod cell_display;
mod key_binding_display;
mod session_display;
mod stats_display;

/// Colors and styles shared by the widgets.
mod theme {
    use blockfall_engine::{PieceKind, SessionState};
    use ratatui::{
        style::{Color, Style},
        text::Line,
        widgets::{Block, Padding},
    };

    pub const TEXT: Style = Style::new().fg(Color::White).bg(Color::Black);
    pub const DIM: Style = Style::new().fg(Color::DarkGray).bg(Color::Black);
    pub const KEY: Style = Style::new().fg(Color::Cyan).bg(Color::Black);
    pub const GAME_OVER: Style = Style::new().fg(Color::White).bg(Color::Red);

    pub const fn solid(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const LOCKED: Style = solid(Color::Gray);

    pub const fn piece_color(kind: PieceKind) -> Color {
        match kind {
            PieceKind::I => Color::Rgb(0, 255, 255),
            PieceKind::O => Color::Rgb(255, 255, 0),
            PieceKind::T => Color::Rgb(255, 0, 255),
            PieceKind::L => Color::Rgb(255, 127, 0),
            PieceKind::J => Color::Rgb(0, 0, 255),
            PieceKind::S => Color::Rgb(0, 255, 0),
            PieceKind::Z => Color::Rgb(255, 0, 0),
        }
    }

    pub fn border_color(state: SessionState) -> Color {
        if state.is_game_over() {
            Color::Red
        } else {
            Color::White
        }
    }

    /// A bordered side panel with a centered title.
    pub fn panel(title: &str, state: SessionState) -> Block<'_> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(1))
            .border_style(border_color(state))
            .style(TEXT)
    }
}

/// Outer size of a widget whose content is `width`×`height`, framed by `block`.
fn framed_size(block: Option<&BlockWidget>, width: u16, height: u16) -> (u16, u16) {
    let Some(block) = block else {
        return (width, height);
    };
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.inner(outer);
    (
        width.saturating_add(outer.width - inner.width),
        height.saturating_add(outer.height - inner.height),
    )
}

/// Converts a cell count to terminal units, saturating on huge boards.
fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
