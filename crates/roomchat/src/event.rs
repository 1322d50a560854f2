//! Event handling for the TUI.
//!
//! Converts raw terminal events (from crossterm) into `Action`s. Keys that
//! aren't bound to anything are passed through for the input line.
//!
//! # Key Bindings
//!
//! | Key          | Action                          |
//! |--------------|---------------------------------|
//! | Ctrl+C / Esc | Quit                            |
//! | Tab          | Next room                       |
//! | Shift+Tab    | Previous room                   |
//! | Enter        | Submit the input line           |
//! | anything else| Forwarded to the input line     |

use crate::app::Action;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Converts a crossterm `Event` into an optional `Action`.
///
/// Returns `None` for events the client doesn't react to (mouse, focus,
/// key releases on terminals that report them).
pub fn handle_event(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(handle_key_event(key)),
        Event::Paste(text) => Some(Action::Paste(text.clone())),
        Event::Resize(width, height) => Some(Action::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn handle_key_event(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Tab => Action::NextRoom,
        KeyCode::BackTab => Action::PrevRoom,
        KeyCode::Enter => Action::Submit,
        _ => Action::Key(*key),
    }
}
