use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectUp,
    SelectDown,
    JumpTop,
    JumpBottom,
    AddVolume,     // a: open the path prompt
    RemoveVolume,  // d / Delete: stop watching the selected volume
    Refresh,       // r: poll now instead of waiting for the timer
    CycleTheme,
    ShowHelp,
    Back,
    None,
}

/// Keys while the add-volume path prompt is open.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptAction {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Navigation — arrow keys and vim jk
        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::SelectUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::SelectDown,
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpTop,
        (KeyCode::Char('G'), _) | (KeyCode::End,  _) => Action::JumpBottom,

        (KeyCode::Char('a'), _) | (KeyCode::Insert, _) => Action::AddVolume,
        (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => Action::RemoveVolume,
        (KeyCode::Char('r'), _) => Action::Refresh,
        (KeyCode::Char('t'), _) => Action::CycleTheme,
        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)   => Action::ShowHelp,
        (KeyCode::Esc, _)      => Action::Back,

        _ => Action::None,
    }
}

pub fn handle_prompt_key(key: KeyEvent) -> PromptAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => PromptAction::Cancel,
        (KeyCode::Esc, _)       => PromptAction::Cancel,
        (KeyCode::Enter, _)     => PromptAction::Submit,
        (KeyCode::Backspace, _) => PromptAction::Backspace,
        (KeyCode::Char(c), _)   => PromptAction::Insert(c),
        _ => PromptAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn list_keys() {
        assert_eq!(handle_key(key(KeyCode::Char('a'))), Action::AddVolume);
        assert_eq!(handle_key(key(KeyCode::Delete)), Action::RemoveVolume);
        assert_eq!(handle_key(key(KeyCode::Char('j'))), Action::SelectDown);
        assert_eq!(handle_key(key(KeyCode::Char('r'))), Action::Refresh);
        assert_eq!(handle_key(key(KeyCode::Char('z'))), Action::None);
        assert_eq!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn prompt_keys_take_letters_literally() {
        assert_eq!(handle_prompt_key(key(KeyCode::Char('q'))), PromptAction::Insert('q'));
        assert_eq!(handle_prompt_key(key(KeyCode::Char('/'))), PromptAction::Insert('/'));
        assert_eq!(handle_prompt_key(key(KeyCode::Enter)), PromptAction::Submit);
        assert_eq!(handle_prompt_key(key(KeyCode::Esc)), PromptAction::Cancel);
        assert_eq!(handle_prompt_key(key(KeyCode::Backspace)), PromptAction::Backspace);
    }
}
