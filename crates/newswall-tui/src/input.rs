use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    MoveUp,
    MoveDown,
    OpenInBrowser,
    RefreshAll,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,

        // Navigation between panels
        (KeyCode::Tab, KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::FocusPrev,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::FocusPrev,
        (KeyCode::Right, KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::Left, KeyModifiers::NONE) => Action::FocusPrev,

        // Navigation within a panel
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::MoveDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::MoveUp,

        // Actions
        (KeyCode::Enter, KeyModifiers::NONE) => Action::OpenInBrowser,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenInBrowser,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::RefreshAll,

        _ => Action::None,
    }
}
