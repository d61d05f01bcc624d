//! Key bindings: terminal key events to reducer actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Action;
use crate::models::{FieldKind, FormField};

/// Rows moved by PageUp/PageDown
const PAGE_SCROLL: i32 = 10;

/// Map a key press to an action given the focused field
pub fn action_for_key(key: KeyEvent, focus: FormField) -> Option<Action> {
    // Only handle key press events (ignore release/repeat on Windows)
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let on_choice = focus.kind() == FieldKind::Choice;

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('c') if ctrl => Some(Action::Quit),

        KeyCode::F(2) => Some(Action::LoadExample),
        KeyCode::Char('l') if ctrl => Some(Action::LoadExample),
        KeyCode::F(5) => Some(Action::Generate),
        KeyCode::Char('g') if ctrl => Some(Action::Generate),
        KeyCode::F(6) => Some(Action::CopyText),
        KeyCode::Char('y') if ctrl => Some(Action::CopyText),
        KeyCode::F(9) => Some(Action::Export),
        KeyCode::Char('p') if ctrl => Some(Action::Export),
        KeyCode::Char('u') if ctrl => Some(Action::ClearField),

        KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrev),
        KeyCode::PageDown => Some(Action::ScrollPlan(PAGE_SCROLL)),
        KeyCode::PageUp => Some(Action::ScrollPlan(-PAGE_SCROLL)),

        KeyCode::Left | KeyCode::Right | KeyCode::Enter if on_choice => Some(Action::CycleChoice),
        KeyCode::Char(' ') if on_choice => Some(Action::CycleChoice),

        KeyCode::Backspace => Some(Action::DeleteChar),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Action::InsertChar(c))
        }
        _ => None,
    }
}
