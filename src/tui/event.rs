use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::core::state::LanguageName;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Page commands (become core actions or navigation)
    Quit,
    Save,
    ToggleEditor(LanguageName),
    ToggleJs,
    OpenList,
    Home,
    DismissError,
    ClearErrors,
    CycleFocus,

    // Text editing (handled by the focused component)
    InputChar(char),
    Paste(String),
    Backspace,
    Delete,
    Enter,
    Tab,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    PageUp,
    PageDown,
    Escape,
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    // A failed poll/read (e.g. terminal gone) is treated as "no event".
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            translate_key(key_event.modifiers, key_event.code)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => Some(TuiEvent::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::Save),
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(TuiEvent::OpenList),
        (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(TuiEvent::Home),
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => Some(TuiEvent::CycleFocus),
        (_, KeyCode::F(2)) => Some(TuiEvent::ToggleEditor(LanguageName::Html)),
        (_, KeyCode::F(3)) => Some(TuiEvent::ToggleEditor(LanguageName::Css)),
        (_, KeyCode::F(4)) => Some(TuiEvent::ToggleEditor(LanguageName::Ruby)),
        (_, KeyCode::F(5)) => Some(TuiEvent::ToggleJs),
        (_, KeyCode::F(8)) => Some(TuiEvent::DismissError),
        (_, KeyCode::F(9)) => Some(TuiEvent::ClearErrors),
        (_, KeyCode::BackTab) => Some(TuiEvent::CycleFocus),
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Enter) => Some(TuiEvent::Enter),
        (_, KeyCode::Tab) => Some(TuiEvent::Tab),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_chords_become_commands() {
        assert_eq!(
            translate_key(KeyModifiers::CONTROL, KeyCode::Char('s')),
            Some(TuiEvent::Save)
        );
        assert_eq!(
            translate_key(KeyModifiers::CONTROL, KeyCode::Char('q')),
            Some(TuiEvent::Quit)
        );
    }

    #[test]
    fn test_function_keys_toggle_editors() {
        assert_eq!(
            translate_key(KeyModifiers::NONE, KeyCode::F(4)),
            Some(TuiEvent::ToggleEditor(LanguageName::Ruby))
        );
        assert_eq!(translate_key(KeyModifiers::NONE, KeyCode::F(5)), Some(TuiEvent::ToggleJs));
    }

    #[test]
    fn test_plain_keys_are_editing_events() {
        assert_eq!(
            translate_key(KeyModifiers::SHIFT, KeyCode::Char('A')),
            Some(TuiEvent::InputChar('A'))
        );
        assert_eq!(translate_key(KeyModifiers::NONE, KeyCode::Tab), Some(TuiEvent::Tab));
        assert_eq!(translate_key(KeyModifiers::NONE, KeyCode::Enter), Some(TuiEvent::Enter));
    }
}
