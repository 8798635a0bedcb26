use std::{io, time::Duration};

use blockfall_engine::{Action, ActionSource};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::ui::widgets::KeyBinding;

/// Terminal events, read without blocking when `has_pending` is true.
trait EventQueue {
    fn has_pending(&mut self) -> io::Result<bool>;
    fn next_event(&mut self) -> io::Result<Event>;
}

#[derive(Debug)]
struct TerminalEvents;

impl EventQueue for TerminalEvents {
    fn has_pending(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }

    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Reads player actions from terminal key presses.
#[derive(Debug, Default)]
pub struct KeyInput;

impl KeyInput {
    pub fn new() -> Self {
        Self
    }

    /// Blocks until a key is pressed.
    ///
    /// Keys typed before the call are discarded first.
    pub fn wait_for_key(&mut self) -> io::Result<()> {
        wait_for_fresh_key(&mut TerminalEvents)
    }
}

impl ActionSource for KeyInput {
    fn poll_action(&mut self) -> io::Result<Option<Action>> {
        next_action(&mut TerminalEvents)
    }
}

fn next_action(events: &mut impl EventQueue) -> io::Result<Option<Action>> {
    while events.has_pending()? {
        if let Some(key) = key_press(events.next_event()?)
            && let Some(action) = action_from_key(&key)
        {
            return Ok(Some(action));
        }
    }
    Ok(None)
}

fn wait_for_fresh_key(events: &mut impl EventQueue) -> io::Result<()> {
    while events.has_pending()? {
        events.next_event()?;
    }
    while key_press(events.next_event()?).is_none() {}
    Ok(())
}

fn key_press(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

fn action_from_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Action::MoveRight),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Action::SoftDrop),
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Action::Rotate),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

pub const KEY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &["←", "a"],
        action: Action::MoveLeft,
    },
    KeyBinding {
        keys: &["→", "d"],
        action: Action::MoveRight,
    },
    KeyBinding {
        keys: &["↓", "s"],
        action: Action::SoftDrop,
    },
    KeyBinding {
        keys: &["↑", "w"],
        action: Action::Rotate,
    },
    KeyBinding {
        keys: &["q", "Esc"],
        action: Action::Quit,
    },
];
