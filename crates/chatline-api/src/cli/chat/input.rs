//! Key handling for the chat input buffer.
//!
//! Enter submits. Shift+Enter inserts a newline instead; Alt+Enter does the
//! same for terminals that cannot report Shift with Enter.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    /// The buffer changed and needs a redraw.
    Edited,
    Quit,
    Ignored,
}

/// Apply `key` to `buffer`.
pub fn handle_key(buffer: &mut String, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::Ignored;
    }

    match key.code {
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
        {
            buffer.push('\n');
            InputAction::Edited
        }
        KeyCode::Enter => InputAction::Submit,
        KeyCode::Backspace => {
            if buffer.pop().is_some() {
                InputAction::Edited
            } else {
                InputAction::Ignored
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            InputAction::Edited
        }
        _ => InputAction::Ignored,
    }
}
