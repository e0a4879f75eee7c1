//! # PlainEditor
//!
//! Fallback code pane without its own buffer: the text shown is always the
//! store's, and every edit goes back out as an `UpdateCode` with the whole
//! document. Tab, Enter and soft-tab Backspace are intercepted and rewritten
//! (see `indent`); for those the caret is only moved after the next draw,
//! once the dispatched text has actually been rendered.
//!
//! Also used read-only for the compiled JS pane.

use std::cell::Cell;
use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::action::Action;
use crate::core::state::Language;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::caret::{
    Viewport, clamp, line_end, line_start, move_vertically, next_char_boundary,
    prev_char_boundary,
};
use crate::tui::components::indent::{self, Edit};
use crate::tui::event::TuiEvent;
use crate::tui::highlight::{highlight, plain};

/// State that outlives a render pass: where the caret is and what's
/// scrolled into view.
#[derive(Debug, Default, Clone)]
pub struct PlainEditorState {
    pub caret: Rc<Cell<usize>>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlainEditorEvent {
    /// Ordinary input. The caret has already moved.
    Input(Action),
    /// Rewritten key. Dispatch `action`, then move the caret to `caret` on
    /// the next frame.
    Intercepted { action: Action, caret: usize },
}

pub struct PlainEditor<'a> {
    language: &'a Language,
    state: &'a mut PlainEditorState,
    read_only: bool,
    focused: bool,
}

impl<'a> PlainEditor<'a> {
    pub fn new(language: &'a Language, state: &'a mut PlainEditorState) -> Self {
        Self {
            language,
            state,
            read_only: false,
            focused: false,
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn code(&self) -> &str {
        &self.language.code
    }

    fn caret(&self) -> usize {
        clamp(self.code(), self.state.caret.get())
    }

    fn update_code(&self, code: String) -> Action {
        Action::UpdateCode {
            language: self.language.name,
            code,
        }
    }

    /// Browser-default edit: text and caret change together.
    fn input(&mut self, start: usize, end: usize, replacement: &str) -> PlainEditorEvent {
        let mut code = self.code().to_string();
        code.replace_range(start..end, replacement);
        self.state.caret.set(start + replacement.len());
        PlainEditorEvent::Input(self.update_code(code))
    }

    fn intercepted(&self, edit: Edit) -> PlainEditorEvent {
        PlainEditorEvent::Intercepted {
            caret: edit.caret,
            action: self.update_code(edit.code),
        }
    }

    fn move_to(&mut self, pos: usize) -> Option<PlainEditorEvent> {
        self.state.caret.set(pos);
        None
    }
}

impl Component for PlainEditor<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let caret = self.caret();
        self.state.viewport.resize(area.height);
        self.state.viewport.follow(&self.language.code, caret);

        let mut title = self.language.name.as_str().to_string();
        if self.read_only {
            title.push_str(" (read-only)");
        }
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let lines = if self.language.code.is_empty() {
            // Placeholder, like an empty textarea.
            plain(self.language.name.as_str())
                .into_iter()
                .map(|l| l.style(Style::default().fg(Color::DarkGray)))
                .collect()
        } else {
            highlight(self.language.name, &self.language.code)
        };

        let paragraph = Paragraph::new(lines)
            .scroll((self.state.viewport.scroll_offset, 0))
            .block(
                Block::bordered()
                    .border_type(BorderType::Plain)
                    .border_style(border_style)
                    .title(title),
            );
        frame.render_widget(paragraph, area);

        if self.focused
            && let Some(pos) = self
                .state
                .viewport
                .screen_pos(&self.language.code, caret, area)
        {
            frame.set_cursor_position(pos);
        }
    }
}

impl EventHandler for PlainEditor<'_> {
    type Event = PlainEditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let caret = self.caret();
        let len = self.code().len();

        // Navigation works read-only too.
        match event {
            TuiEvent::CursorLeft if caret > 0 => {
                return self.move_to(prev_char_boundary(self.language.code.as_str(), caret));
            }
            TuiEvent::CursorRight if caret < len => {
                return self.move_to(next_char_boundary(self.language.code.as_str(), caret));
            }
            TuiEvent::CursorHome => return self.move_to(line_start(self.code(), caret)),
            TuiEvent::CursorEnd => return self.move_to(line_end(self.code(), caret)),
            TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::PageUp | TuiEvent::PageDown => {
                let rows = self.state.viewport.rows.max(1) as isize;
                let lines = match event {
                    TuiEvent::CursorUp => -1,
                    TuiEvent::CursorDown => 1,
                    TuiEvent::PageUp => -rows,
                    _ => rows,
                };
                let pos = move_vertically(self.code(), caret, lines)?;
                return self.move_to(pos);
            }
            _ => {}
        }

        if self.read_only {
            return None;
        }

        match event {
            TuiEvent::Tab => Some(self.intercepted(indent::insert_tab(self.code(), caret))),
            TuiEvent::Enter => Some(self.intercepted(indent::newline_with_indent(
                self.code(),
                caret,
            ))),
            TuiEvent::Backspace => match indent::smart_backspace(self.code(), caret) {
                Some(edit) => Some(self.intercepted(edit)),
                None if caret > 0 => {
                    let prev = prev_char_boundary(self.code(), caret);
                    Some(self.input(prev, caret, ""))
                }
                None => None,
            },
            TuiEvent::Delete if caret < len => {
                let next = next_char_boundary(self.code(), caret);
                Some(self.input(caret, next, ""))
            }
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                let s = c.encode_utf8(&mut buf);
                Some(self.input(caret, caret, s))
            }
            TuiEvent::Paste(data) => {
                let data = data.replace("\r\n", "\n");
                Some(self.input(caret, caret, &data))
            }
            _ => None,
        }
    }
}
