use std::io;

use blockfall_engine::{Renderer, SessionView};
use ratatui::DefaultTerminal;

use crate::ui::widgets::SessionDisplay;

/// Draws each frame to the terminal owned by `ratatui::run`.
#[derive(Debug)]
pub struct TerminalRenderer<'a> {
    terminal: &'a mut DefaultTerminal,
}

impl<'a> TerminalRenderer<'a> {
    pub fn new(terminal: &'a mut DefaultTerminal) -> Self {
        Self { terminal }
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn render(&mut self, view: &SessionView<'_>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(SessionDisplay::new(*view), frame.area()))?;
        Ok(())
    }
}
