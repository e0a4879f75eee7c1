//! Dismissible error list shown above the page.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::action::Action;
use crate::core::state::AppError;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Most error rows shown at once; longer lists scroll.
pub const MAX_VISIBLE_ERRORS: usize = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ErrorListState {
    pub selected: usize,
}

pub struct ErrorMessages<'a> {
    pub errors: &'a [AppError],
    pub focused: bool,
    pub state: &'a mut ErrorListState,
}

impl ErrorMessages<'_> {
    /// Rows needed for `count` errors; zero hides the list entirely.
    pub fn height(count: usize) -> u16 {
        if count == 0 {
            0
        } else {
            (count.min(MAX_VISIBLE_ERRORS) as u16).saturating_add(2)
        }
    }

    /// First row to show so the selection stays inside `rows`.
    fn scroll_offset(&self, rows: u16) -> u16 {
        let rows = usize::from(rows.max(1));
        let selected = self.selected().unwrap_or(0);
        selected.saturating_sub(rows - 1) as u16
    }

    fn selected(&self) -> Option<usize> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.state.selected.min(self.errors.len() - 1))
        }
    }
}

impl Component for ErrorMessages<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.errors.is_empty() || area.height == 0 {
            return;
        }
        let selected = self.selected();
        let lines: Vec<Line> = self
            .errors
            .iter()
            .enumerate()
            .map(|(i, error)| {
                let marker = if self.focused && selected == Some(i) {
                    Span::styled("⨉ ", Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    Span::raw("⨉ ")
                };
                Line::from(vec![marker, Span::raw(error.message.clone())])
            })
            .collect();

        let block = Block::bordered()
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(Color::Red))
            .title("Errors ([F8] dismiss, [F9] clear)");
        let offset = self.scroll_offset(area.height.saturating_sub(2));
        frame.render_widget(
            Paragraph::new(lines)
                .scroll((offset, 0))
                .block(block)
                .style(Style::default().fg(Color::LightRed)),
            area,
        );
    }
}

impl EventHandler for ErrorMessages<'_> {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let selected = self.selected()?;
        match event {
            TuiEvent::CursorUp => {
                self.state.selected = selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.state.selected = (selected + 1).min(self.errors.len() - 1);
                None
            }
            TuiEvent::DismissError | TuiEvent::Enter | TuiEvent::Delete => {
                Some(Action::DeleteError {
                    error: self.errors[selected].clone(),
                })
            }
            TuiEvent::ClearErrors => Some(Action::ClearErrors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ErrorKind;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn errors() -> Vec<AppError> {
        vec![
            AppError::new(ErrorKind::Network, "connection refused"),
            AppError::new(ErrorKind::Api { status: 404 }, "not found"),
        ]
    }

    #[test]
    fn test_dismiss_selected() {
        let errors = errors();
        let mut state = ErrorListState::default();
        let mut list = ErrorMessages {
            errors: &errors,
            focused: true,
            state: &mut state,
        };
        list.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            list.handle_event(&TuiEvent::DismissError),
            Some(Action::DeleteError {
                error: errors[1].clone()
            })
        );
    }

    #[test]
    fn test_selection_clamped_after_errors_shrink() {
        let errors = errors();
        let mut state = ErrorListState { selected: 5 };
        let mut list = ErrorMessages {
            errors: &errors[..1],
            focused: true,
            state: &mut state,
        };
        assert_eq!(
            list.handle_event(&TuiEvent::DismissError),
            Some(Action::DeleteError {
                error: errors[0].clone()
            })
        );
    }

    #[test]
    fn test_empty_list_ignores_events() {
        let mut state = ErrorListState::default();
        let mut list = ErrorMessages {
            errors: &[],
            focused: true,
            state: &mut state,
        };
        assert_eq!(list.handle_event(&TuiEvent::ClearErrors), None);
        assert_eq!(ErrorMessages::height(0), 0);
    }

    #[test]
    fn test_height_is_capped() {
        assert_eq!(ErrorMessages::height(2), 4);
        assert_eq!(ErrorMessages::height(MAX_VISIBLE_ERRORS), 7);
        assert_eq!(ErrorMessages::height(40), 7);
    }

    #[test]
    fn test_long_list_scrolls_to_selection() {
        let errors: Vec<AppError> = (0..8)
            .map(|i| AppError::new(ErrorKind::Network, format!("failure {i}")))
            .collect();
        let mut state = ErrorListState { selected: 7 };
        let height = ErrorMessages::height(errors.len());
        let mut terminal = Terminal::new(TestBackend::new(50, height)).unwrap();
        terminal
            .draw(|f| {
                ErrorMessages {
                    errors: &errors,
                    focused: true,
                    state: &mut state,
                }
                .render(f, f.area())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("failure 7"));
        assert!(text.contains("failure 3"));
        assert!(!text.contains("failure 2"));
    }

    #[test]
    fn test_render_lists_messages() {
        let errors = errors();
        let mut state = ErrorListState::default();
        let mut terminal = Terminal::new(TestBackend::new(50, 4)).unwrap();
        terminal
            .draw(|f| {
                ErrorMessages {
                    errors: &errors,
                    focused: false,
                    state: &mut state,
                }
                .render(f, f.area())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("connection refused"));
        assert!(text.contains("not found"));
    }
}
