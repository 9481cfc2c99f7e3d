use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    Escape,
    ToggleFocus,
    Submit,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    PrevDay,
    NextDay,
    ToggleFavorite,
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Escape,

        // Focus and submit
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Action::ToggleFocus,
        (KeyCode::Enter, _) => Action::Submit,

        // Cursor within the page (Vim/Emacs style too)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,

        // Paging
        (KeyCode::PageUp, _) => Action::PrevPage,
        (KeyCode::PageDown, _) => Action::NextPage,

        // Day stepping
        (KeyCode::Left, KeyModifiers::CONTROL) => Action::PrevDay,
        (KeyCode::Right, KeyModifiers::CONTROL) => Action::NextDay,

        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ToggleFavorite,

        // Text input for the focused field
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
