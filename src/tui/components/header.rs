//! # Header Component
//!
//! Name input plus the playground's buttons (editor toggles, save).
//!
//! ## Props
//!
//! - `name`: current playground name (store state)
//! - `languages`: html/css/ruby, for the toggle indicators
//! - `show_js`: whether the compiled JS pane is open
//! - `persisted`: whether saving will update or create
//!
//! ## State
//!
//! Only the caret inside the name field (`NameInputState`). The name itself
//! is never held here: every keystroke becomes a `SetPlaygroundName`
//! carrying the whole new name, and the next render shows it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::core::state::Language;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Rows the header occupies.
pub const HEADER_HEIGHT: u16 = 4;

const PLACEHOLDER: &str = "Name this app";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NameInputState {
    /// Byte offset into the name.
    pub caret: usize,
}

pub struct Header<'a> {
    pub name: &'a str,
    pub languages: [&'a Language; 3],
    pub show_js: bool,
    pub persisted: bool,
    pub focused: bool,
    pub state: &'a mut NameInputState,
}

impl Header<'_> {
    fn caret(&self) -> usize {
        let mut caret = self.state.caret.min(self.name.len());
        while !self.name.is_char_boundary(caret) {
            caret -= 1;
        }
        caret
    }

    fn rename(&mut self, name: String, caret: usize) -> Option<Action> {
        self.state.caret = caret;
        Some(Action::SetPlaygroundName { name })
    }

    fn buttons(&self) -> Line<'static> {
        let key = Style::default().fg(Color::Cyan);
        let toggle = |on: bool| {
            if on {
                Span::styled(" ●  ", Style::default().fg(Color::Green))
            } else {
                Span::styled(" ○  ", Style::default().fg(Color::DarkGray))
            }
        };

        let mut spans = Vec::new();
        for (fkey, lang) in ["F2", "F3", "F4"].iter().zip(self.languages) {
            spans.push(Span::styled(format!("[{}] ", fkey), key));
            spans.push(Span::raw(format!("Toggle {}", lang.name)));
            spans.push(toggle(lang.is_shown()));
        }
        spans.push(Span::styled("[F5] ", key));
        spans.push(Span::raw("Toggle compiled JS"));
        spans.push(toggle(self.show_js));
        spans.push(Span::styled("[^S] ", key));
        spans.push(Span::raw(if self.persisted { "Save" } else { "Save new" }));
        Line::from(spans)
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [input_area, buttons_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

        let (text, style) = if self.name.is_empty() {
            (PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            (self.name, Style::default().add_modifier(Modifier::BOLD))
        };
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(Span::styled(text, style)).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        );
        frame.render_widget(input, input_area);
        frame.render_widget(Paragraph::new(self.buttons()), buttons_area);

        if self.focused {
            let column = self.name[..self.caret()].width() as u16;
            let max = input_area.width.saturating_sub(3);
            frame.set_cursor_position((input_area.x + 1 + column.min(max), input_area.y + 1));
        }
    }
}

impl EventHandler for Header<'_> {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let caret = self.caret();
        match event {
            TuiEvent::InputChar(c) => {
                let mut name = self.name.to_string();
                name.insert(caret, *c);
                self.rename(name, caret + c.len_utf8())
            }
            TuiEvent::Paste(data) => {
                // Names are single-line.
                let data: String = data.chars().filter(|c| !c.is_control()).collect();
                let mut name = self.name.to_string();
                name.insert_str(caret, &data);
                self.rename(name, caret + data.len())
            }
            TuiEvent::Backspace if caret > 0 => {
                let prev = self.name[..caret]
                    .char_indices()
                    .next_back()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                let mut name = self.name.to_string();
                name.replace_range(prev..caret, "");
                self.rename(name, prev)
            }
            TuiEvent::Delete if caret < self.name.len() => {
                let next = self.name[caret..]
                    .chars()
                    .next()
                    .map(|c| caret + c.len_utf8())
                    .unwrap_or(caret);
                let mut name = self.name.to_string();
                name.replace_range(caret..next, "");
                self.rename(name, caret)
            }
            TuiEvent::CursorLeft => {
                self.state.caret = self.name[..caret]
                    .char_indices()
                    .next_back()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorRight => {
                self.state.caret = self.name[caret..]
                    .chars()
                    .next()
                    .map(|c| caret + c.len_utf8())
                    .unwrap_or(caret);
                None
            }
            TuiEvent::CursorHome => {
                self.state.caret = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.state.caret = self.name.len();
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::AppState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn header<'a>(state: &'a AppState, input: &'a mut NameInputState) -> Header<'a> {
        Header {
            name: &state.name,
            languages: state.sources(),
            show_js: state.show_js,
            persisted: state.is_persisted(),
            focused: true,
            state: input,
        }
    }

    #[test]
    fn test_typing_emits_whole_name() {
        let mut state = AppState::initial();
        state.name = "Dem".to_string();
        let mut input = NameInputState { caret: 3 };

        let action = header(&state, &mut input).handle_event(&TuiEvent::InputChar('o'));
        assert_eq!(
            action,
            Some(Action::SetPlaygroundName {
                name: "Demo".to_string()
            })
        );
        assert_eq!(input.caret, 4);
    }

    #[test]
    fn test_backspace_mid_name() {
        let mut state = AppState::initial();
        state.name = "Deemo".to_string();
        let mut input = NameInputState { caret: 3 };

        let action = header(&state, &mut input).handle_event(&TuiEvent::Backspace);
        assert_eq!(
            action,
            Some(Action::SetPlaygroundName {
                name: "Demo".to_string()
            })
        );
        assert_eq!(input.caret, 2);
    }

    #[test]
    fn test_backspace_at_start_does_nothing() {
        let state = AppState::initial();
        let mut input = NameInputState::default();
        assert_eq!(header(&state, &mut input).handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_render_shows_placeholder_and_toggles() {
        let state = AppState::initial();
        let mut input = NameInputState::default();
        let mut terminal = Terminal::new(TestBackend::new(140, HEADER_HEIGHT)).unwrap();
        terminal
            .draw(|f| header(&state, &mut input).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Toggle ruby ●"));
        assert!(text.contains("Toggle html ○"));
        assert!(text.contains("Save new"));
    }
}
