//! Keyboard input handling
//!
//! Maps key events to console actions. Mapping is pure so it can be tested without a
//! terminal; the app decides what each action does.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::control::Command;

/// Something the user asked the console to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run one of the four session commands
    Command(Command),
    /// Press the latching logging toggle
    LoggingToggle,
    /// Press the latching pause toggle
    PauseToggle,
    /// Flip automatic mode
    ToggleAutomatic,
    /// Raise the simulated ground speed by one step
    SpeedUp,
    /// Lower the simulated ground speed by one step
    SpeedDown,
    /// Leave the console
    Quit,
}

/// Key bindings shown in the footer
pub const KEY_HINTS: &str =
    "s: start | x: stop | p: pause | r: resume | Enter/Space: toggles | a: auto | ↑/↓: speed | q: quit";

/// Map a key event to an action
///
/// Key releases and unbound keys map to `None`.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('s') => Some(Action::Command(Command::Start)),
        KeyCode::Char('x') => Some(Action::Command(Command::Stop)),
        KeyCode::Char('p') => Some(Action::Command(Command::Pause)),
        KeyCode::Char('r') => Some(Action::Command(Command::Resume)),
        KeyCode::Enter => Some(Action::LoggingToggle),
        KeyCode::Char(' ') => Some(Action::PauseToggle),
        KeyCode::Char('a') => Some(Action::ToggleAutomatic),
        KeyCode::Up | KeyCode::Char('+') => Some(Action::SpeedUp),
        KeyCode::Down | KeyCode::Char('-') => Some(Action::SpeedDown),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
